use super::format_score;
use crate::error::AuditError;
use crate::types::report::{Category, PageReport};

/// Flattens the page reports into one row per page with a column per
/// category score. Column names are part of the output contract.
pub fn pages_csv(pages: &[PageReport]) -> Result<String, AuditError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["url".to_string(), "load_ms".to_string()];
    for category in Category::ALL {
        header.push(format!("{category}_score"));
        header.push(format!("{category}_issues"));
    }
    header.push("error".to_string());
    writer.write_record(&header)?;

    for page in pages {
        let mut row = vec![
            page.url.clone(),
            page.load_ms
                .map(|ms| format!("{ms:.0}"))
                .unwrap_or_default(),
        ];
        for category in Category::ALL {
            match page.categories.get(&category) {
                Some(score) => {
                    row.push(format_score(score.score));
                    row.push(score.issues.len().to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        row.push(page.error.clone().unwrap_or_default());
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| AuditError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
