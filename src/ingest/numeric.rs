/// Outcome of reading one numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// A parsed number.
    Value(f64),
    /// Empty, `-`, or trace (`Tr`); counts as zero without being a defect.
    NoData,
    /// Anything else; also counts as zero.
    Unparsable,
}

impl Cell {
    pub fn value(self) -> f64 {
        match self {
            Cell::Value(v) => v,
            Cell::NoData | Cell::Unparsable => 0.0,
        }
    }
}

/// Classify a table cell. Accepts `,` as the decimal separator.
pub fn parse_cell(raw: &str) -> Cell {
    let s = raw.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("tr") {
        return Cell::NoData;
    }
    match s.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Value(v),
        _ => Cell::Unparsable,
    }
}

/// Numeric value of a cell; never fails.
pub fn parse_number(raw: &str) -> f64 {
    parse_cell(raw).value()
}
