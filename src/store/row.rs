//! @acp:module "Row Codec"
//! @acp:summary "Project records to and from worksheet rows"
//! @acp:domain storage
//! @acp:layer logic

use serde_json::json;

use super::backend::Cell;
use crate::project::{Impact, Project};

/// Header row written to every user worksheet
pub const HEADER: [&str; 6] = [
    "Project",
    "Reach (%)",
    "Impact",
    "Confidence (%)",
    "Effort (months)",
    "RICE Score",
];

pub fn header_row() -> Vec<Cell> {
    HEADER.iter().map(|h| json!(h)).collect()
}

pub fn to_row(project: &Project) -> Vec<Cell> {
    vec![
        json!(project.name),
        json!(project.reach),
        json!(project.impact.value()),
        json!(project.confidence),
        json!(project.effort),
        json!(project.score),
    ]
}

/// Decode a data row; the error names the offending column
pub fn from_row(row: &[Cell]) -> Result<Project, String> {
    if row.len() < HEADER.len() {
        return Err(format!(
            "expected {} columns, found {}",
            HEADER.len(),
            row.len()
        ));
    }
    let name = match &row[0] {
        Cell::String(s) if !s.trim().is_empty() => s.clone(),
        Cell::Number(n) => n.to_string(),
        other => return Err(format!("{}: invalid value {}", HEADER[0], other)),
    };
    let impact_cell = &row[2];
    let impact = match impact_cell {
        Cell::String(s) => s.parse::<Impact>().ok(),
        other => other.as_f64().and_then(Impact::from_value),
    }
    .ok_or_else(|| format!("{}: invalid value {}", HEADER[2], impact_cell))?;

    Ok(Project {
        name,
        reach: percentage(&row[1], HEADER[1])?,
        impact,
        confidence: percentage(&row[3], HEADER[3])?,
        effort: number(&row[4], HEADER[4])?,
        score: number(&row[5], HEADER[5])?,
    })
}

fn number(cell: &Cell, column: &str) -> Result<f64, String> {
    let value = match cell {
        Cell::Number(n) => n.as_f64(),
        Cell::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{}: invalid value {}", column, cell))
}

fn percentage(cell: &Cell, column: &str) -> Result<u8, String> {
    let value = number(cell, column)?;
    if value.fract() != 0.0 || !(0.0..=100.0).contains(&value) {
        return Err(format!("{}: {} is not a whole percentage", column, value));
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row(),
            vec![
                json!("Project"),
                json!("Reach (%)"),
                json!("Impact"),
                json!("Confidence (%)"),
                json!("Effort (months)"),
                json!("RICE Score"),
            ]
        );
    }

    #[test]
    fn test_decodes_numbers_and_text() {
        let row = vec![
            json!("Push Notifications"),
            json!("70"),
            json!(2),
            json!(95.0),
            json!("2.0"),
            json!(66.5),
        ];
        let project = from_row(&row).unwrap();
        assert_eq!(project, Project::examples()[1]);
    }

    #[test]
    fn test_encodes_in_header_order() {
        let row = to_row(&Project::examples()[0]);
        assert_eq!(row[0], json!("Mobile App Redesign"));
        assert_eq!(row[2], json!(3.0));
        assert_eq!(row[5], json!(36.0));
        assert_eq!(from_row(&row).unwrap(), Project::examples()[0]);
    }

    #[test]
    fn test_rejects_malformed_rows() {
        assert!(from_row(&[json!("short")]).is_err());

        let mut row = to_row(&Project::examples()[2]);
        row[2] = json!(1.5);
        assert!(from_row(&row).unwrap_err().starts_with("Impact"));

        let mut row = to_row(&Project::examples()[2]);
        row[1] = json!(150);
        assert!(from_row(&row).unwrap_err().starts_with("Reach"));

        let mut row = to_row(&Project::examples()[2]);
        row[4] = json!("lots");
        assert!(from_row(&row).unwrap_err().starts_with("Effort"));
    }

    #[test]
    fn test_stored_score_is_written_verbatim() {
        let mut project = Project::examples()[0].clone();
        project.score = 14.456;
        assert_eq!(to_row(&project)[5], json!(14.456));
    }
}
