use serde::{Deserialize, Serialize};

/// Read parameters for the `cars` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParams {
    /// Table to read from
    pub table: String,
    /// Only rows with `available = true`
    pub available_only: bool,
    /// Column to order by
    pub order_by: String,
    /// Sort direction
    pub ascending: bool,
}

impl QueryParams {
    /// PostgREST query string, e.g.
    /// `select=*&available=eq.true&order=created_at.desc`
    pub fn to_query_string(&self) -> String {
        let mut parts = vec!["select=*".to_string()];
        if self.available_only {
            parts.push("available=eq.true".to_string());
        }
        let direction = if self.ascending { "asc" } else { "desc" };
        parts.push(format!("order={}.{}", self.order_by, direction));
        parts.join("&")
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            table: "cars".to_string(),
            available_only: true,
            order_by: "created_at".to_string(),
            ascending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_string() {
        assert_eq!(
            QueryParams::default().to_query_string(),
            "select=*&available=eq.true&order=created_at.desc"
        );
    }

    #[test]
    fn test_custom_query_string() {
        let params = QueryParams {
            available_only: false,
            order_by: "price".to_string(),
            ascending: true,
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "select=*&order=price.asc");
    }
}
