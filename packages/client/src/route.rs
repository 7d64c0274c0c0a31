//! Navigation targets.

use std::collections::BTreeMap;

/// Path of the results screen.
pub const SAFETY_ROUTE: &str = "/safety";

/// Name of the parameter carrying the serialized backend response.
pub const DATA_PARAM: &str = "data";

/// A screen to navigate to, with string-valued parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Screen path.
    pub pathname: String,
    /// Navigation parameters.
    pub params: BTreeMap<String, String>,
}

impl Route {
    /// The results screen carrying `data` as its only parameter.
    #[must_use]
    pub fn safety(data: String) -> Self {
        Self {
            pathname: SAFETY_ROUTE.to_string(),
            params: BTreeMap::from([(DATA_PARAM.to_string(), data)]),
        }
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The `data` parameter, if present.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.param(DATA_PARAM)
    }
}
