//! Changelog classification and rendering.
//!
//! Commit message lines carry an optional leading marker that decides which
//! section of the report they land in:
//!
//! | marker     | category          |
//! |------------|-------------------|
//! | `!`        | major enhancement |
//! | `+` or `*` | minor enhancement |
//! | `-`        | bug fix           |
//! | (none)     | unknown           |

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;

/// Section of the changelog a line belongs to.
///
/// Variant order is render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Major,
    Minor,
    Bug,
    Unknown,
}

impl Category {
    /// All categories in render order.
    pub const ALL: [Category; 4] = [
        Category::Major,
        Category::Minor,
        Category::Bug,
        Category::Unknown,
    ];

    /// Singular label used in section headings.
    pub fn label(self) -> &'static str {
        match self {
            Category::Major => "major enhancement",
            Category::Minor => "minor enhancement",
            Category::Bug => "bug fix",
            Category::Unknown => "unknown",
        }
    }

    /// Label for `count` entries: "1 bug fix", "2 bug fixes", "3 major enhancements".
    pub fn pluralized(self, count: usize) -> String {
        let label = self.label();
        if count <= 1 {
            label.to_string()
        } else if label.ends_with('x') {
            format!("{}es", label)
        } else {
            format!("{}s", label)
        }
    }
}

/// Marker characters and the category each selects, checked in order.
pub const MARKERS: [(char, Category); 4] = [
    ('!', Category::Major),
    ('+', Category::Minor),
    ('*', Category::Minor),
    ('-', Category::Bug),
];

/// Classifies a single commit message line.
///
/// Leading whitespace before the marker and whitespace around the remaining
/// text are ignored. Lines without a marker keep their text minus trailing
/// whitespace and land in [`Category::Unknown`].
pub fn classify_line(line: &str) -> (Category, String) {
    let trimmed = line.trim_start();

    if let Some(first) = trimmed.chars().next() {
        if let Some((_, category)) = MARKERS.iter().find(|(marker, _)| *marker == first) {
            let content = trimmed[first.len_utf8()..].trim();
            return (*category, content.to_string());
        }
    }

    (Category::Unknown, line.trim_end().to_string())
}

/// Lines of one report, bucketed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changelog {
    buckets: BTreeMap<Category, Vec<String>>,
}

impl Changelog {
    /// Classifies every line into its bucket.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changelog = Changelog::default();
        for line in lines {
            let (category, content) = classify_line(line.as_ref());
            changelog.buckets.entry(category).or_default().push(content);
        }
        changelog
    }

    /// Lines filed under `category`, in insertion order.
    pub fn entries(&self, category: Category) -> &[String] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of classified lines.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the report, or `None` when there is nothing to report.
    ///
    /// `label` is the version shown in the header, `NEXT` when absent.
    pub fn render(&self, label: Option<&str>, date: NaiveDate) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== {} / {}",
            label.unwrap_or("NEXT"),
            date.format("%Y-%m-%d")
        );
        out.push('\n');

        for category in Category::ALL {
            let entries = self.entries(category);
            if entries.is_empty() {
                continue;
            }

            let mut sorted: Vec<&String> = entries.iter().collect();
            sorted.sort();

            let _ = writeln!(
                out,
                "* {} {}:",
                entries.len(),
                category.pluralized(entries.len())
            );
            out.push('\n');
            for line in sorted {
                let _ = writeln!(out, "  * {}", line);
            }
            out.push('\n');
        }

        out.push('\n');
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_each_marker_maps_to_its_category() {
        for (marker, expected) in MARKERS {
            for line in [
                format!("{} text", marker),
                format!("{}text", marker),
                format!("   {}   text  ", marker),
                format!("\t{}\ttext", marker),
            ] {
                assert_eq!(
                    classify_line(&line),
                    (expected, "text".to_string()),
                    "line {:?}",
                    line
                );
            }
        }
    }

    #[test]
    fn test_unmarked_line_is_unknown() {
        assert_eq!(
            classify_line("fix bar  \r"),
            (Category::Unknown, "fix bar".to_string())
        );
        assert_eq!(
            classify_line("  indented note"),
            (Category::Unknown, "  indented note".to_string())
        );
    }

    #[test]
    fn test_marker_must_lead_the_line() {
        assert_eq!(classify_line("Merge ! branch").0, Category::Unknown);
        assert_eq!(classify_line("a - b").0, Category::Unknown);
    }

    #[test]
    fn test_pluralization() {
        assert_eq!(Category::Bug.pluralized(1), "bug fix");
        assert_eq!(Category::Bug.pluralized(2), "bug fixes");
        assert_eq!(Category::Major.pluralized(1), "major enhancement");
        assert_eq!(Category::Major.pluralized(3), "major enhancements");
        assert_eq!(Category::Minor.pluralized(2), "minor enhancements");
        assert_eq!(Category::Unknown.pluralized(2), "unknowns");
    }

    #[test]
    fn test_empty_changelog_renders_nothing() {
        let changelog = Changelog::from_lines(Vec::<String>::new());
        assert!(changelog.is_empty());
        assert_eq!(changelog.render(None, date()), None);
    }

    #[test]
    fn test_render_orders_categories_and_sorts_entries() {
        let changelog = Changelog::from_lines([
            "? stray",
            "- zeta fix",
            "+ beta",
            "! big",
            "- alpha fix",
            "* alpha",
        ]);

        let report = changelog.render(Some("1.2.0"), date()).unwrap();
        let expected = "\
=== 1.2.0 / 2024-03-09

* 1 major enhancement:

  * big

* 2 minor enhancements:

  * alpha
  * beta

* 2 bug fixes:

  * alpha fix
  * zeta fix

* 1 unknown:

  * ? stray


";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_omits_empty_categories() {
        let changelog = Changelog::from_lines(["- only a fix"]);
        let report = changelog.render(None, date()).unwrap();

        assert!(report.starts_with("=== NEXT / 2024-03-09\n\n"));
        assert!(report.contains("* 1 bug fix:\n\n  * only a fix\n"));
        assert!(!report.contains("enhancement"));
        assert!(!report.contains("unknown"));
    }

    #[test]
    fn test_entries_keep_insertion_order_until_render() {
        let changelog = Changelog::from_lines(["- b", "- a"]);
        assert_eq!(changelog.entries(Category::Bug), ["b", "a"]);
        assert!(changelog.entries(Category::Major).is_empty());
        assert_eq!(changelog.len(), 2);
    }
}
