use crate::config::PresenterConfig;
use crate::core::presenter::Presenter;
use crate::domain::ports::SubjectRef;
use crate::utils::error::{PresenterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Placeholder path that binds no subject to its role.
pub const ABSENT_SUBJECT: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

pub fn load_subjects(paths: &[String]) -> Result<Vec<Option<Value>>> {
    paths
        .iter()
        .map(|path| {
            if path == ABSENT_SUBJECT {
                return Ok(None);
            }
            let content = std::fs::read_to_string(Path::new(path))?;
            let value: Value = serde_json::from_str(&content)?;
            tracing::debug!("Loaded subject from {}", path);
            Ok(Some(value))
        })
        .collect()
}

fn into_subject(value: Option<Value>) -> Option<SubjectRef> {
    value.map(|value| Arc::new(value) as SubjectRef)
}

/// Builds presenters for `subjects`; with `collection` the first subject must
/// be an array and each item gets its own presenter.
pub fn present(
    config: &PresenterConfig,
    presenter: &str,
    subjects: Vec<Option<Value>>,
    collection: bool,
) -> Result<Vec<Presenter>> {
    let registry = config.build_registry()?;
    let class = registry.fetch(presenter)?;

    if !collection {
        let subjects = subjects.into_iter().map(into_subject).collect();
        return Ok(vec![class.present(subjects)]);
    }

    let mut values = subjects.into_iter();
    let items = match values.next().flatten() {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(PresenterError::ConfigValidationError {
                field: "subjects[0]".to_string(),
                message: "A collection must be a JSON array".to_string(),
            })
        }
        None => Vec::new(),
    };
    let extras: Vec<Option<SubjectRef>> = values.map(into_subject).collect();

    tracing::info!("Presenting {} items with {}", items.len(), class.name());
    Ok(class.map(items.into_iter().map(|item| Arc::new(item) as SubjectRef), &extras))
}

pub fn render(presenters: &[Presenter], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = presenters
                .iter()
                .map(|presenter| Value::Object(presenter.to_json()))
                .collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Csv => render_csv(presenters),
    }
}

fn render_csv(presenters: &[Presenter]) -> Result<String> {
    let columns: Vec<String> = presenters
        .first()
        .map(|presenter| presenter.class().attributes().keys().cloned().collect())
        .unwrap_or_default();

    let mut writer = csv::Writer::from_writer(Vec::new());
    if !columns.is_empty() {
        writer.write_record(&columns)?;
        for presenter in presenters {
            let row = presenter.to_json();
            writer.write_record(columns.iter().map(|column| csv_cell(row.get(column))))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PresenterError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| PresenterError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> PresenterConfig {
        PresenterConfig::from_toml_str(
            r#"
[[presenters]]
name = "CommentPresenter"
subjects = ["comment", "post"]
expose = [
  { attributes = ["body"] },
  { attributes = ["name"], with = "user" },
  { attributes = ["title"], with = "post" },
]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_present_single() {
        let comment = json!({"body": "Some comment", "user": {"name": "John Doe"}});
        let presenters = present(&config(), "CommentPresenter", vec![Some(comment), None], false).unwrap();

        assert_eq!(presenters.len(), 1);
        assert_eq!(presenters[0].call("user_name").as_str(), Some("John Doe"));
        assert!(presenters[0].call("post_title").is_absent());
    }

    #[test]
    fn test_present_collection() {
        let comments = json!([{"body": "first"}, {"body": "second"}]);
        let post = json!({"title": "Some post"});
        let presenters =
            present(&config(), "CommentPresenter", vec![Some(comments), Some(post)], true).unwrap();

        assert_eq!(presenters.len(), 2);
        assert_eq!(presenters[1].call("body").as_str(), Some("second"));
        assert_eq!(presenters[1].call("post_title").as_str(), Some("Some post"));
    }

    #[test]
    fn test_collection_requires_array() {
        let result = present(&config(), "CommentPresenter", vec![Some(json!({"body": "x"}))], true);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_presenter() {
        let result = present(&config(), "PostPresenter", vec![], false);
        assert!(matches!(result, Err(PresenterError::UnknownPresenter { .. })));
    }

    #[test]
    fn test_render_csv() {
        let comments = json!([{"body": "first", "user": {"name": "Ann"}}, {"body": "second, with comma"}]);
        let presenters = present(&config(), "CommentPresenter", vec![Some(comments)], true).unwrap();

        let output = render(&presenters, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "body,post_title,user_name");
        assert_eq!(lines[1], "first,,Ann");
        assert_eq!(lines[2], "\"second, with comma\",,");
    }

    #[test]
    fn test_render_json() {
        let comment = json!({"body": "Some comment"});
        let presenters = present(&config(), "CommentPresenter", vec![Some(comment)], false).unwrap();

        let output: Value = serde_json::from_str(&render(&presenters, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(
            output,
            json!([{"body": "Some comment", "post_title": null, "user_name": null}])
        );
    }
}
