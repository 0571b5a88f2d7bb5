// Favorites leave the app as a file: JSON (the original download), CSV, or Markdown
use std::path::Path;

use crate::{models::FavoriteQuote, Error, Result};

/// File name the favorites download has always used
pub const DEFAULT_EXPORT_FILE: &str = "favorite-quotes.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    /// Format implied by the file name
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                Error::ExportError(format!(
                    "Don't know how to export to {:?}; use a .json, .csv or .md file",
                    path
                ))
            })
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn render(self, favorites: &[FavoriteQuote]) -> Result<String> {
        match self {
            ExportFormat::Json => Exporter::to_json(favorites),
            ExportFormat::Csv => Ok(Exporter::to_csv(favorites)),
            ExportFormat::Markdown => Ok(Exporter::to_markdown(favorites)),
        }
    }
}

pub struct Exporter;

impl Exporter {
    /// Write favorites to `path` in the format its extension names
    ///
    /// Returns the format that was used.
    pub fn export_to_file<P: AsRef<Path>>(favorites: &[FavoriteQuote], path: P) -> Result<ExportFormat> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        Self::write(favorites, path, format)?;
        Ok(format)
    }

    pub fn write(favorites: &[FavoriteQuote], path: &Path, format: ExportFormat) -> Result<()> {
        let content = format.render(favorites)?;
        std::fs::write(path, content)
            .map_err(|e| Error::ExportError(format!("Failed to write {:?}: {}", path, e)))
    }

    /// Standalone JSON document, two-space indented
    ///
    /// Parses straight back into `Vec<FavoriteQuote>`.
    pub fn to_json(favorites: &[FavoriteQuote]) -> Result<String> {
        Ok(serde_json::to_string_pretty(favorites)?)
    }

    pub fn to_csv(favorites: &[FavoriteQuote]) -> String {
        let rows = favorites.iter().map(|fav| {
            let q = &fav.quote;
            format!(
                "{},{},{},{},{}\n",
                csv_field(&q.text),
                csv_field(&q.author),
                csv_field(&q.category),
                q.length,
                fav.favorited_at,
            )
        });

        std::iter::once("Text,Author,Category,Length,Favorited At\n".to_string())
            .chain(rows)
            .collect()
    }

    pub fn to_markdown(favorites: &[FavoriteQuote]) -> String {
        let mut out = format!("# Favorite Quotes\n\n{} saved\n", favorites.len());

        for fav in favorites {
            out.push_str(&format!(
                "\n> {}\n>\n> — {}\n\n`{}`\n",
                fav.quote.text, fav.quote.author, fav.quote.category
            ));
        }

        out
    }
}

/// Quote a CSV field only when it needs it
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use tempfile::TempDir;

    fn favorite() -> FavoriteQuote {
        FavoriteQuote {
            quote: Quote {
                id: "Lao Tzu-1-0.25".to_string(),
                text: "A journey of a thousand miles begins with a single step.".to_string(),
                author: "Lao Tzu".to_string(),
                category: "inspirational".to_string(),
                length: 56,
            },
            favorited_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.JSON")).unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("q.csv")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("q.markdown")).unwrap(), ExportFormat::Markdown);
        assert!(matches!(ExportFormat::from_path(Path::new("q.txt")), Err(Error::ExportError(_))));
        assert!(matches!(ExportFormat::from_path(Path::new("noext")), Err(Error::ExportError(_))));
        assert_eq!(ExportFormat::Markdown.extension(), "md");
    }

    #[test]
    fn test_json_export_is_indented_and_parses_back() {
        let favorites = vec![favorite()];
        let json = Exporter::to_json(&favorites).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"favoritedAt\": 1700000000000"));

        let parsed: Vec<FavoriteQuote> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, favorites);
    }

    #[test]
    fn test_empty_json_export() {
        assert_eq!(Exporter::to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_csv_export() {
        let csv = Exporter::to_csv(&[favorite()]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Text,Author,Category,Length,Favorited At"));
        assert_eq!(
            lines.next(),
            Some("A journey of a thousand miles begins with a single step.,Lao Tzu,inspirational,56,1700000000000")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_markdown_export() {
        let md = Exporter::to_markdown(&[favorite()]);
        assert!(md.starts_with("# Favorite Quotes\n\n1 saved\n"));
        assert!(md.contains("> — Lao Tzu"));
        assert!(md.contains("`inspirational`"));
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("simple"), "simple");
        assert_eq!(csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(csv_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_export_to_file_picks_format() {
        let dir = TempDir::new().unwrap();

        let json_path = dir.path().join(DEFAULT_EXPORT_FILE);
        let format = Exporter::export_to_file(&[favorite()], &json_path).unwrap();
        assert_eq!(format, ExportFormat::Json);
        let parsed: Vec<FavoriteQuote> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);

        let csv_path = dir.path().join("favorites.csv");
        assert_eq!(Exporter::export_to_file(&[favorite()], &csv_path).unwrap(), ExportFormat::Csv);
        assert!(std::fs::read_to_string(&csv_path).unwrap().starts_with("Text,Author"));

        let bad = Exporter::export_to_file(&[], dir.path().join("quotes.txt"));
        assert!(matches!(bad, Err(Error::ExportError(_))));
    }

    #[test]
    fn test_write_into_missing_dir_is_export_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let result = Exporter::write(&[], &path, ExportFormat::Json);
        assert!(matches!(result, Err(Error::ExportError(_))));
    }
}
