//! @acp:module "Sheets Backend"
//! @acp:summary "Google Sheets v4 REST client"
//! @acp:domain storage
//! @acp:layer integration
//!
//! Speaks the Sheets v4 values API with a bearer token taken from a
//! credentials bundle. Documents are opened by URL, or by name through a
//! Drive files search.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use super::backend::{Backend, Cell, StoreResult, Workbook};
use super::StoreError;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4";
const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Credentials bundle read from disk
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsCredentials {
    pub access_token: String,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub drive_base: Option<String>,
}

impl SheetsCredentials {
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        let credentials: SheetsCredentials = serde_json::from_str(&content).map_err(|e| {
            StoreError::Credentials(format!("invalid bundle {}: {}", path.display(), e))
        })?;
        if credentials.access_token.trim().is_empty() {
            return Err(StoreError::Credentials("access_token is empty".to_string()));
        }
        Ok(credentials)
    }
}

/// Authorized Sheets client
pub struct SheetsBackend {
    agent: ureq::Agent,
    token: String,
    api_base: String,
    drive_base: String,
}

impl SheetsBackend {
    pub fn new(credentials: SheetsCredentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("rice/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            token: credentials.access_token,
            api_base: credentials
                .api_base
                .unwrap_or_else(|| SHEETS_API.to_string())
                .trim_end_matches('/')
                .to_string(),
            drive_base: credentials
                .drive_base
                .unwrap_or_else(|| DRIVE_API.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn get(&self, url: &str) -> ureq::Request {
        self.agent.get(url).set("Authorization", &self.auth())
    }

    fn post(&self, url: &str) -> ureq::Request {
        self.agent.post(url).set("Authorization", &self.auth())
    }

    /// Find a spreadsheet id by exact document name
    fn find_by_name(&self, name: &str) -> StoreResult<String> {
        #[derive(Deserialize)]
        struct FileList {
            #[serde(default)]
            files: Vec<DriveFile>,
        }
        #[derive(Deserialize)]
        struct DriveFile {
            id: String,
        }

        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        let list: FileList = self
            .get(&format!("{}/files", self.drive_base))
            .query("q", &query)
            .query("fields", "files(id,name)")
            .call()
            .map_err(http_error)?
            .into_json()?;
        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| StoreError::Backend(format!("spreadsheet '{}' not found", name)))
    }

    fn sheet_titles(&self, spreadsheet_id: &str) -> StoreResult<Vec<String>> {
        #[derive(Deserialize)]
        struct Spreadsheet {
            #[serde(default)]
            sheets: Vec<Sheet>,
        }
        #[derive(Deserialize)]
        struct Sheet {
            properties: SheetProperties,
        }
        #[derive(Deserialize)]
        struct SheetProperties {
            title: String,
        }

        let spreadsheet: Spreadsheet = self
            .get(&format!("{}/spreadsheets/{}", self.api_base, spreadsheet_id))
            .query("fields", "sheets.properties.title")
            .call()
            .map_err(http_error)?
            .into_json()?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }
}

impl Backend for SheetsBackend {
    fn name(&self) -> &'static str {
        "sheets"
    }

    fn open(&self, locator: &str) -> StoreResult<Box<dyn Workbook + '_>> {
        let spreadsheet_id = match spreadsheet_id_from_url(locator) {
            Some(id) => id,
            None => self.find_by_name(locator)?,
        };
        let titles = self.sheet_titles(&spreadsheet_id)?;
        tracing::debug!(
            "Opened spreadsheet {} with {} worksheet(s)",
            spreadsheet_id,
            titles.len()
        );
        Ok(Box::new(SheetsWorkbook {
            backend: self,
            spreadsheet_id,
            titles,
        }))
    }
}

struct SheetsWorkbook<'a> {
    backend: &'a SheetsBackend,
    spreadsheet_id: String,
    titles: Vec<String>,
}

impl SheetsWorkbook<'_> {
    fn values_url(&self, title: &str, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.backend.api_base,
            self.spreadsheet_id,
            urlencoding::encode(&a1_range(title)),
            suffix
        )
    }
}

impl Workbook for SheetsWorkbook<'_> {
    fn has_sheet(&mut self, title: &str) -> StoreResult<bool> {
        Ok(self.titles.iter().any(|t| t == title))
    }

    fn add_sheet(&mut self, title: &str, rows: usize, cols: usize) -> StoreResult<()> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": cols }
                    }
                }
            }]
        });
        self.backend
            .post(&format!(
                "{}/spreadsheets/{}:batchUpdate",
                self.backend.api_base, self.spreadsheet_id
            ))
            .send_json(body)
            .map_err(http_error)?;
        self.titles.push(title.to_string());
        Ok(())
    }

    fn rows(&mut self, title: &str) -> StoreResult<Vec<Vec<Cell>>> {
        #[derive(Deserialize)]
        struct ValueRange {
            #[serde(default)]
            values: Vec<Vec<Cell>>,
        }

        let range: ValueRange = self
            .backend
            .get(&self.values_url(title, ""))
            .query("valueRenderOption", "UNFORMATTED_VALUE")
            .query("majorDimension", "ROWS")
            .call()
            .map_err(http_error)?
            .into_json()?;
        Ok(range
            .values
            .into_iter()
            .filter(|row| !row.is_empty())
            .collect())
    }

    fn clear(&mut self, title: &str) -> StoreResult<()> {
        self.backend
            .post(&self.values_url(title, ":clear"))
            .send_json(json!({}))
            .map_err(http_error)?;
        Ok(())
    }

    fn append_row(&mut self, title: &str, row: &[Cell]) -> StoreResult<()> {
        self.append_rows(title, &[row.to_vec()])
    }

    fn append_rows(&mut self, title: &str, rows: &[Vec<Cell>]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.backend
            .post(&self.values_url(title, ":append"))
            .query("valueInputOption", "RAW")
            .query("insertDataOption", "OVERWRITE")
            .send_json(json!({ "majorDimension": "ROWS", "values": rows }))
            .map_err(http_error)?;
        Ok(())
    }
}

/// Extract the id from `https://docs.google.com/spreadsheets/d/<id>/...`
pub fn spreadsheet_id_from_url(locator: &str) -> Option<String> {
    let url = url::Url::parse(locator).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "d")?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}

/// Whole-sheet A1 range, quoting the title
fn a1_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn http_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            StoreError::Http(format!("status {}: {}", code, body.trim()))
        }
        ureq::Error::Transport(transport) => StoreError::Http(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spreadsheet_id_from_url() {
        assert_eq!(
            spreadsheet_id_from_url("https://docs.google.com/spreadsheets/d/1AbC_d-9/edit#gid=0"),
            Some("1AbC_d-9".to_string())
        );
        assert_eq!(spreadsheet_id_from_url("RICE Calculator Data"), None);
        assert_eq!(spreadsheet_id_from_url("https://example.com/sheets/1AbC"), None);
    }

    #[test]
    fn test_a1_range_quotes_title() {
        assert_eq!(a1_range("Jonas"), "'Jonas'");
        assert_eq!(a1_range("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_credentials_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");

        std::fs::write(&path, r#"{"access_token": "ya29.token"}"#).unwrap();
        let creds = SheetsCredentials::load(&path).unwrap();
        assert_eq!(creds.access_token, "ya29.token");
        assert!(creds.api_base.is_none());

        std::fs::write(&path, r#"{"type": "service_account"}"#).unwrap();
        assert!(matches!(
            SheetsCredentials::load(&path),
            Err(StoreError::Credentials(_))
        ));

        assert!(SheetsCredentials::load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_backend_trims_base_urls() {
        let backend = SheetsBackend::new(SheetsCredentials {
            access_token: "t".to_string(),
            api_base: Some("http://localhost:9000/v4/".to_string()),
            drive_base: None,
        });
        assert_eq!(backend.api_base, "http://localhost:9000/v4");
        assert_eq!(backend.drive_base, DRIVE_API);
    }
}
