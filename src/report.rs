// src/report.rs
use std::io::{self, Write};

use crate::config::consts::{NO_MATCH_MARKER, SECTION_MARKER};

/// One output line worth of cells. Never padded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatRow(pub Vec<String>);

impl FlatRow {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FlatRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FlatRow(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSection {
    Rows(Vec<FlatRow>),
    /// Server found alleles but assigned no sequence type.
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDocument {
    pub allele_header: FlatRow,
    pub alleles: Vec<FlatRow>,
    pub types: TypeSection,
}

/// A lone comma between tabs is what the normalizer folds away.
fn needs_quotes(cell: &str) -> bool {
    cell.replace(' ', "") == ","
}

/// Write a single delimited row.
pub fn write_row<W: Write>(mut w: W, row: &FlatRow, sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row.cells() {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

impl OutputDocument {
    /// Un-normalized report text:
    /// header, allele rows, 2 blank lines, `MLST`, blank line, type rows or marker.
    pub fn render(&self, sep: char) -> String {
        let mut buf: Vec<u8> = Vec::new();
        // Writes into a Vec<u8> cannot fail.
        let _ = self.write_to(&mut buf, sep);
        match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
        }
    }

    pub fn write_to<W: Write>(&self, mut w: W, sep: char) -> io::Result<()> {
        write_row(&mut w, &self.allele_header, sep)?;
        for row in &self.alleles {
            write_row(&mut w, row, sep)?;
        }
        write!(w, "\n\n{SECTION_MARKER}\n\n")?;
        match &self.types {
            TypeSection::Rows(rows) => {
                for row in rows {
                    write_row(&mut w, row, sep)?;
                }
            }
            TypeSection::Missing => writeln!(w, "{NO_MATCH_MARKER}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> FlatRow {
        cells.iter().copied().collect()
    }

    #[test]
    fn renders_sections_in_order() {
        let doc = OutputDocument {
            allele_header: row(&["Locus", "Allele"]),
            alleles: vec![row(&["adk", "1"]), row(&["atpA", "1"])],
            types: TypeSection::Rows(vec![row(&["ST", "3"])]),
        };
        assert_eq!(
            doc.render('\t'),
            "Locus\tAllele\nadk\t1\natpA\t1\n\n\nMLST\n\nST\t3\n"
        );
    }

    #[test]
    fn missing_type_section_renders_marker() {
        let doc = OutputDocument {
            allele_header: row(&["Locus"]),
            alleles: vec![],
            types: TypeSection::Missing,
        };
        assert_eq!(doc.render('\t'), "Locus\n\n\nMLST\n\nno_match_found\n");
    }

    #[test]
    fn comma_cell_survives_normalizing() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row(&["adk", ",", "x"]), '\t').unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(crate::core::sanitize::normalize_line(&line), "adk\t\",\"\tx");
    }

    #[test]
    fn empty_row_is_blank_line() {
        let mut buf = Vec::new();
        write_row(&mut buf, &FlatRow::default(), '\t').unwrap();
        assert_eq!(buf, b"\n");
    }
}
