// src/specs/sequence_query.rs
//
// Result page of `page=sequenceQuery`:
//   table 0: navigation/decoration (ignored)
//   table 1: allele calls  (Locus | Allele | Length | Contig | ...)
//   table 2: sequence type (row labels in <th>, values in <td>), absent when no ST matched

use scraper::{ElementRef, Html};

use crate::config::consts::MAX_CELLS;
use crate::core::html::{count_open_tags, strip_non_markup, tags_balanced};
use crate::core::sanitize::normalize_ws;
use crate::error::{MlstError, Result};
use crate::report::{FlatRow, OutputDocument, TypeSection};

#[derive(Clone, Debug)]
pub enum TableMatch<'a> {
    /// Anything other than 2 or 3 top-level tables.
    NoMatch { tables: usize },
    AllelesOnly(ElementRef<'a>),
    AllelesAndType { alleles: ElementRef<'a>, types: ElementRef<'a> },
}

/// Parse a response body, refusing markup whose table boundaries can't be trusted.
pub fn parse(body: &str) -> Result<Html> {
    if body.trim().is_empty() {
        return Err(MlstError::Parse("empty response body".into()));
    }
    if !tags_balanced(body, "table") {
        return Err(MlstError::Parse(format!(
            "unbalanced table markup ({} <table> tags)",
            count_open_tags(&strip_non_markup(body), "table")
        )));
    }
    Ok(Html::parse_document(body))
}

fn is(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Closest enclosing <table>, not counting `el` itself.
fn enclosing_table<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is(a, "table"))
}

/// Tables not nested in another table, in document order.
pub fn top_level_tables(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| is(e, "table") && enclosing_table(e).is_none())
        .collect()
}

pub fn extract(doc: &Html) -> TableMatch<'_> {
    let tables = top_level_tables(doc);
    match tables.as_slice() {
        [_, alleles] => TableMatch::AllelesOnly(*alleles),
        [_, alleles, types] => TableMatch::AllelesAndType { alleles: *alleles, types: *types },
        other => TableMatch::NoMatch { tables: other.len() },
    }
}

/// Rows owned by `table` itself; rows of nested tables are skipped.
fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |e| is(e, "tr") && enclosing_table(e).map(|t| t.id()) == Some(table.id()))
}

/// Direct `<tag>` children of a row, as cleaned text.
fn cells(row: ElementRef<'_>, tag: &str) -> impl Iterator<Item = String> {
    let tag = tag.to_string();
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| is(c, &tag))
        .map(|c| normalize_ws(&c.text().collect::<Vec<_>>().join(" ")))
}

/// Header = first 4 `<th>` of the table; one body row per row with `<td>` cells,
/// truncated to 4 cells. Short rows stay short.
pub fn flatten_alleles(table: ElementRef<'_>) -> (FlatRow, Vec<FlatRow>) {
    let header: FlatRow = own_rows(table)
        .flat_map(|tr| cells(tr, "th"))
        .take(MAX_CELLS)
        .collect();

    let rows = own_rows(table)
        .map(|tr| cells(tr, "td").take(MAX_CELLS).collect::<FlatRow>())
        .filter(|r| !r.is_empty())
        .collect();

    (header, rows)
}

/// Each row: up to 4 label cells (`<th>`) then up to 4 value cells (`<td>`).
pub fn flatten_types(table: ElementRef<'_>) -> Vec<FlatRow> {
    own_rows(table)
        .map(|tr| {
            cells(tr, "th")
                .take(MAX_CELLS)
                .chain(cells(tr, "td").take(MAX_CELLS))
                .collect::<FlatRow>()
        })
        .filter(|r| !r.is_empty())
        .collect()
}

pub fn to_document(m: &TableMatch<'_>) -> Result<OutputDocument> {
    let (alleles, types) = match m {
        TableMatch::NoMatch { tables } => return Err(MlstError::NoMatch { tables: *tables }),
        TableMatch::AllelesOnly(a) => (*a, TypeSection::Missing),
        TableMatch::AllelesAndType { alleles, types } => {
            (*alleles, TypeSection::Rows(flatten_types(*types)))
        }
    };
    let (allele_header, alleles) = flatten_alleles(alleles);
    Ok(OutputDocument { allele_header, alleles, types })
}

/// parse → extract → flatten.
pub fn scrape(body: &str) -> Result<OutputDocument> {
    let doc = parse(body)?;
    let m = extract(&doc);
    match &m {
        TableMatch::NoMatch { tables } => logd!("{tables} top-level tables: no match"),
        TableMatch::AllelesOnly(_) => logd!("allele table only: no sequence type assigned"),
        TableMatch::AllelesAndType { .. } => logd!("allele and sequence type tables found"),
    }
    to_document(&m)
}
