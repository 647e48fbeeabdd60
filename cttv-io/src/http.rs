use std::io::Read;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use ureq::{Error as UreqError, get};

use crate::consts::{CELLBASE_CLINVAR_PATH, DEFAULT_CELLBASE_HOST};
use crate::error::{Result, SourceError};
use crate::source::{PageFetcher, RawPage};

#[derive(Deserialize, Debug)]
struct CellbaseResponse {
    #[serde(default)]
    response: Vec<QueryResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    num_total_results: Option<u64>,
    #[serde(default)]
    result: Vec<Value>,
}

///
/// Fetches ClinVar documents from the Cellbase REST service, one page per request.
///
pub struct CellbaseFetcher {
    host: String,
    reported_total: bool,
}

impl Default for CellbaseFetcher {
    fn default() -> Self {
        CellbaseFetcher::new(DEFAULT_CELLBASE_HOST)
    }
}

impl CellbaseFetcher {
    pub fn new(host: &str) -> Self {
        CellbaseFetcher {
            host: host.to_string(),
            reported_total: false,
        }
    }

    pub fn page_url(&self, skip: usize, limit: usize) -> String {
        format!(
            "http://{}{}?source=clinvar&skip={}&limit={}",
            self.host, CELLBASE_CLINVAR_PATH, skip, limit
        )
    }
}

impl PageFetcher for CellbaseFetcher {
    fn fetch_page(&mut self, skip: usize, limit: usize) -> Result<RawPage> {
        let url = self.page_url(skip, limit);
        debug!("Fetching {}", url);

        let response = match get(&url).call() {
            Ok(resp) => resp,
            Err(UreqError::StatusCode(code)) => {
                return Err(SourceError::Http(format!(
                    "HTTP status {} when fetching {}",
                    code, url
                )));
            }
            Err(e) => {
                return Err(SourceError::Http(format!(
                    "Request error when fetching {}: {}",
                    url, e
                )));
            }
        };

        let mut bytes = Vec::new();
        response.into_body().into_reader().read_to_end(&mut bytes)?;

        let body: CellbaseResponse = serde_json::from_slice(&bytes)?;
        let query = body.response.into_iter().next().ok_or_else(|| {
            SourceError::MalformedResponse(format!("no query result in response from {}", url))
        })?;

        if !self.reported_total {
            if let Some(total) = query.num_total_results {
                info!("{} ClinVar records in total", total);
            }
            self.reported_total = true;
        }

        Ok(RawPage {
            records: query.result,
            num_total_results: query.num_total_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_page_url() {
        let fetcher = CellbaseFetcher::new("localhost:8080");
        assert_eq!(
            fetcher.page_url(2000, 1000),
            "http://localhost:8080/cellbase/webservices/rest/v3/hsapiens/feature/clinical/all?source=clinvar&skip=2000&limit=1000"
        );
    }

    #[rstest]
    fn test_response_parsing() {
        let raw = r#"{"response": [{"numTotalResults": 2, "result": [{"a": 1}, {"a": 2}]}]}"#;
        let body: CellbaseResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.response[0].num_total_results, Some(2));
        assert_eq!(body.response[0].result.len(), 2);
    }
}
