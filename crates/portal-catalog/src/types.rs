//! Catalog wire types.

use serde::{Deserialize, Serialize};

/// A job listing as returned by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Paging and filter parameters forwarded to the catalog untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl JobQuery {
    /// Query-string pairs for the outbound request.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(length) = self.length {
            params.push(("length", length.to_string()));
        }
        if let Some(ref category) = self.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref company) = self.company {
            params.push(("company", company.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_unset() {
        let query = JobQuery {
            length: Some(10),
            category: None,
            company: Some("Acme".to_string()),
        };
        assert_eq!(
            query.to_params(),
            vec![("length", "10".to_string()), ("company", "Acme".to_string())]
        );
        assert!(JobQuery::default().to_params().is_empty());
    }
}
