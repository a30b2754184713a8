//! Heading-delimited section location.
//!
//! A section is the run of paragraphs between a styled heading and the next
//! heading of a qualifying style. Two boundary rules exist: headings of the
//! exact same style (successive peers), and any `"Heading"`-styled
//! paragraph (so a lower-level heading also closes a higher-level section).
//! Both are expressed through one matcher instead of two scan loops.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::model::Paragraph;

/// Style predicate used when scanning for headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMatch<'a> {
    /// Match only the exact style name.
    Exact(&'a str),

    /// Match any style whose name contains `"Heading"`.
    AnyHeading,
}

impl StyleMatch<'_> {
    /// Check whether a paragraph's style satisfies the predicate.
    pub fn matches(&self, paragraph: &Paragraph) -> bool {
        match self {
            StyleMatch::Exact(style) => paragraph.style == *style,
            StyleMatch::AnyHeading => paragraph.is_heading(),
        }
    }

    fn describe(&self) -> String {
        match self {
            StyleMatch::Exact(style) => (*style).to_string(),
            StyleMatch::AnyHeading => "any Heading".to_string(),
        }
    }
}

/// Find the first paragraph whose style matches and whose text equals
/// `title`. Returns `None` when no such heading exists; callers must not
/// assume a match.
pub fn locate(paragraphs: &[Paragraph], title: &str, style: &StyleMatch<'_>) -> Option<usize> {
    paragraphs
        .iter()
        .position(|p| style.matches(p) && p.text == title)
}

/// Find the first matching heading after `after_index`. Returns `None` when
/// the section is the last one in the document.
pub fn next_boundary(
    paragraphs: &[Paragraph],
    style: &StyleMatch<'_>,
    after_index: usize,
) -> Option<usize> {
    paragraphs
        .iter()
        .enumerate()
        .skip(after_index + 1)
        .find(|(_, p)| style.matches(p))
        .map(|(i, _)| i)
}

/// A located section: its heading index and the half-open body range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Paragraph index of the section heading.
    pub heading: usize,

    /// Indices of the body paragraphs, `heading + 1` up to the next
    /// qualifying heading (or end of document).
    pub body: Range<usize>,
}

/// Locate a section by heading title.
///
/// The heading is matched with `title_style`; the closing boundary with
/// `boundary_style`. An open-ended section (no following heading) extends
/// to the end of the document.
pub fn section(
    paragraphs: &[Paragraph],
    title: &str,
    title_style: &StyleMatch<'_>,
    boundary_style: &StyleMatch<'_>,
) -> Result<Section> {
    let heading =
        locate(paragraphs, title, title_style).ok_or_else(|| Error::HeadingNotFound {
            title: title.to_string(),
            style: title_style.describe(),
        })?;
    let end = next_boundary(paragraphs, boundary_style, heading).unwrap_or(paragraphs.len());
    Ok(Section {
        heading,
        body: heading + 1..end,
    })
}
