//! Input validation for the legacy global recs contract.
//!
//! Same rules as the recommendations endpoint, with the legacy parameter
//! spelling (`locale_lang`) and a lower default count. The locale rule
//! still reports under the name `locale`.

use serde::Deserialize;

use crate::api::recommendations::inputs::build_variables;
use crate::errors::RestError;
use crate::graph::queries::RecommendationsVariables;

const DEFAULT_COUNT: i64 = 20;

/// Raw query parameters as provided by the transport.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalRecsParams {
    pub count: Option<String>,
    pub locale_lang: Option<String>,
    pub region: Option<String>,
}

/// Apply defaults, coerce, validate, and transform into gateway variables.
pub fn handle_query_parameters(
    params: &GlobalRecsParams,
) -> Result<RecommendationsVariables, RestError> {
    build_variables(
        params.count.as_deref(),
        params.locale_lang.as_deref(),
        params.region.clone(),
        DEFAULT_COUNT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_lang_maps_to_locale_variable() {
        let params = GlobalRecsParams {
            count: None,
            locale_lang: Some("en-GB".into()),
            region: None,
        };
        let variables = handle_query_parameters(&params).unwrap();
        assert_eq!(variables.locale, "en-GB");
        assert_eq!(variables.count, 20);
    }

    #[test]
    fn test_missing_locale_lang_reports_locale_parameter() {
        let error = handle_query_parameters(&GlobalRecsParams::default()).unwrap_err();
        assert_eq!(
            error.response().errors[0].source.as_ref().unwrap().parameters.as_deref(),
            Some("locale")
        );
    }

    #[test]
    fn test_count_shares_recommendations_bounds() {
        let params = GlobalRecsParams {
            count: Some("31".into()),
            locale_lang: Some("en".into()),
            region: None,
        };
        assert!(handle_query_parameters(&params).is_err());
    }
}
