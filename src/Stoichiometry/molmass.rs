/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Formulas are parsed by recursive descent: element symbols (one uppercase letter followed by
/// lowercase letters while the symbol stays a known element), integer or decimal multipliers and
/// nested groups in (), [] or {} brackets. Named chemical groups (e.g. Me -> CH3) may be registered
/// in a [`FormulaParser`] and are expanded into their atoms.
use super::elements::{atomic_weight, is_element};
use super::stoich_errors::StoichError;
use log::{debug, trace};
use nalgebra::DMatrix;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// phase annotations removed from the end of a formula before parsing, e.g. H2O(g)
const PHASE_MARKS: [&str; 6] = ["(g)", "(l)", "(s)", "(c)", "(aq)", "(cr)"];
/// longest element symbol is one uppercase and two lowercase letters
const MAX_SYMBOL_TAIL: usize = 2;

/// Mapping element symbol -> number of atoms. Keeps the order in which elements were first seen,
/// equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct ElementCounts(Vec<(String, f64)>);

impl ElementCounts {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// adds `count` atoms of `symbol`, summing with atoms already present
    pub fn add(&mut self, symbol: &str, count: f64) {
        match self.0.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, c)) => *c += count,
            None => self.0.push((symbol.to_string(), count)),
        }
    }

    /// adds every element of `other` multiplied by `factor`
    pub fn merge(&mut self, other: &ElementCounts, factor: f64) {
        for (symbol, count) in other.iter() {
            self.add(symbol, count * factor);
        }
    }

    pub fn scaled(&self, factor: f64) -> ElementCounts {
        ElementCounts(
            self.0
                .iter()
                .map(|(s, c)| (s.clone(), c * factor))
                .collect(),
        )
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.iter().find(|(s, _)| s == symbol).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn symbols(&self) -> Vec<String> {
        self.0.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// same set of elements and every count equal within `tol`
    pub fn approx_eq(&self, other: &ElementCounts, tol: f64) -> bool {
        self.len() == other.len()
            && self.iter().all(|(symbol, count)| {
                other
                    .get(symbol)
                    .is_some_and(|other_count| (count - other_count).abs() <= tol)
            })
    }

    pub fn to_hashmap(&self) -> HashMap<String, f64> {
        self.0.iter().cloned().collect()
    }
}

impl PartialEq for ElementCounts {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, 0.0)
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ElementCounts {
    fn from(pairs: [(&str, f64); N]) -> Self {
        let mut counts = ElementCounts::new();
        for (symbol, count) in pairs {
            counts.add(symbol, count);
        }
        counts
    }
}

impl fmt::Display for ElementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, count)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for ElementCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (symbol, count) in self.iter() {
            map.serialize_entry(symbol, &count)?;
        }
        map.end()
    }
}

fn closing_bracket(opening: char) -> char {
    match opening {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Formula parser. Chemical formulae may contain special names for chemical groups, i.e. groups of atoms,
/// e.g. Me (methyl) group, which is converted into {"C":1, "H":3}. Such names must look like element symbols
/// (uppercase letter + up to two lowercase letters).
#[derive(Debug, Clone)]
pub struct FormulaParser {
    pub groups: HashMap<String, ElementCounts>,
    pub strip_phase_marks: bool,
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self {
            groups: HashMap::new(),
            strip_phase_marks: true,
        }
    }
}

impl FormulaParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: HashMap<String, ElementCounts>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    pub fn strip_phase_marks(mut self, strip: bool) -> Self {
        self.strip_phase_marks = strip;
        self
    }

    /// Parses a chemical formula and returns the number of atoms of each element in one formula unit
    pub fn parse(&self, formula: &str) -> Result<ElementCounts, StoichError> {
        let mut cleaned: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
        if self.strip_phase_marks {
            cleaned = filter_phase_marks(&cleaned);
        }
        debug!("parsing formula: {}", cleaned);
        if cleaned.is_empty() {
            return Err(StoichError::format(formula, "empty formula"));
        }
        let mut cursor = Cursor {
            chars: cleaned.chars().collect(),
            pos: 0,
            formula,
            parser: self,
        };
        let counts = cursor.parse_sequence(None)?;
        debug!("atomic composition of {}: {}", formula, counts);
        Ok(counts)
    }

    /// molar mass (g/mol) and atomic composition of a formula
    pub fn molar_mass(&self, formula: &str) -> Result<(f64, ElementCounts), StoichError> {
        let counts = self.parse(formula)?;
        let molar_mass = molar_mass_of_counts(&counts, formula)?;
        Ok((molar_mass, counts))
    }

    /// matrix of atomic composition: rows are formulae, columns are elements in order of first appearance
    pub fn composition_matrix(
        &self,
        vec_of_formulae: &[&str],
    ) -> Result<(DMatrix<f64>, Vec<String>), StoichError> {
        let compositions = vec_of_formulae
            .iter()
            .map(|formula| self.parse(formula))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(composition_matrix_of(&compositions))
    }

    fn is_symbol(&self, candidate: &str) -> bool {
        is_element(candidate) || self.groups.contains_key(candidate)
    }
}

pub(crate) fn composition_matrix_of(compositions: &[ElementCounts]) -> (DMatrix<f64>, Vec<String>) {
    let mut unique_elements = ElementCounts::new();
    for counts in compositions {
        unique_elements.merge(counts, 0.0);
    }
    let elements = unique_elements.symbols();
    let mut matrix = DMatrix::zeros(compositions.len(), elements.len());
    for (i, counts) in compositions.iter().enumerate() {
        for (j, element) in elements.iter().enumerate() {
            if let Some(count) = counts.get(element) {
                matrix[(i, j)] = count;
            }
        }
    }
    (matrix, elements)
}

/// marks are lowercase only: (S), (C) and (Cr) are sulfur, carbon and chromium groups
fn filter_phase_marks(formula: &str) -> String {
    for mark in PHASE_MARKS {
        if let Some(stripped) = formula.strip_suffix(mark).filter(|rest| !rest.is_empty()) {
            return stripped.to_string();
        }
    }
    formula.to_string()
}

struct Cursor<'a> {
    chars: Vec<char>,
    pos: usize,
    formula: &'a str,
    parser: &'a FormulaParser,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: String) -> StoichError {
        StoichError::format(self.formula, reason)
    }

    /// parses until the end of the formula or until the `closing` bracket (which is consumed)
    fn parse_sequence(
        &mut self,
        closing: Option<(char, usize)>,
    ) -> Result<ElementCounts, StoichError> {
        let mut counts = ElementCounts::new();
        while let Some(c) = self.peek() {
            match c {
                '(' | '[' | '{' => {
                    let open_pos = self.pos;
                    self.pos += 1;
                    let group = self.parse_sequence(Some((closing_bracket(c), open_pos)))?;
                    if group.is_empty() {
                        return Err(self.error(format!("empty group at position {}", open_pos)));
                    }
                    let multiplier = self.read_multiplier()?;
                    counts.merge(&group, multiplier);
                }
                ')' | ']' | '}' => {
                    return match closing {
                        Some((expected, _)) if expected == c => {
                            self.pos += 1;
                            Ok(counts)
                        }
                        _ => Err(self.error(format!(
                            "unmatched closing bracket '{}' at position {}",
                            c, self.pos
                        ))),
                    };
                }
                c if c.is_ascii_uppercase() => {
                    let symbol = self.read_symbol()?;
                    let multiplier = self.read_multiplier()?;
                    trace!("found {} x {}", symbol, multiplier);
                    match self.parser.groups.get(&symbol) {
                        Some(group) => counts.merge(group, multiplier),
                        None => counts.add(&symbol, multiplier),
                    }
                }
                '-' => {
                    return Err(self.error(format!(
                        "negative multiplier at position {}",
                        self.pos
                    )));
                }
                c => {
                    return Err(self.error(format!(
                        "unexpected character '{}' at position {}",
                        c, self.pos
                    )));
                }
            }
        }
        if let Some((expected, open_pos)) = closing {
            return Err(self.error(format!(
                "bracket opened at position {} is never closed with '{}'",
                open_pos, expected
            )));
        }
        Ok(counts)
    }

    /// longest run "uppercase + lowercase letters" that is a known element or group, falling back to shorter ones
    fn read_symbol(&mut self) -> Result<String, StoichError> {
        let start = self.pos;
        let mut end = start + 1;
        while end < self.chars.len()
            && end - start <= MAX_SYMBOL_TAIL
            && self.chars[end].is_ascii_lowercase()
        {
            end += 1;
        }
        for candidate_end in (start + 1..=end).rev() {
            let candidate: String = self.chars[start..candidate_end].iter().collect();
            if self.parser.is_symbol(&candidate) {
                self.pos = candidate_end;
                return Ok(candidate);
            }
        }
        let token: String = self.chars[start..end].iter().collect();
        Err(self.error(format!(
            "unknown element '{}' at position {}",
            token, start
        )))
    }

    /// integer or decimal number right after an element or a closing bracket, 1 if absent
    fn read_multiplier(&mut self) -> Result<f64, StoichError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(1.0);
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            let fraction_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == fraction_start || self.peek() == Some('.') {
                let end = (self.pos + 1).min(self.chars.len());
                let token: String = self.chars[start..end].iter().collect();
                return Err(self.error(format!(
                    "malformed multiplier '{}' at position {}",
                    token, start
                )));
            }
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        let multiplier = token.parse::<f64>().map_err(|e| {
            self.error(format!(
                "malformed multiplier '{}' at position {}: {}",
                token, start, e
            ))
        })?;
        if !multiplier.is_finite() {
            return Err(self.error(format!(
                "multiplier '{}' at position {} is too large",
                token, start
            )));
        }
        Ok(multiplier)
    }
}

pub(crate) fn molar_mass_of_counts(
    counts: &ElementCounts,
    formula: &str,
) -> Result<f64, StoichError> {
    let mut molar_mass = 0.0;
    for (symbol, count) in counts.iter() {
        let weight = atomic_weight(symbol).ok_or_else(|| StoichError::UnknownElement {
            symbol: symbol.to_string(),
            formula: formula.to_string(),
        })?;
        molar_mass += weight * count;
    }
    Ok(molar_mass)
}

/// Function to parse a chemical formula and return the number of atoms of each element
pub fn parse_formula(formula: &str) -> Result<ElementCounts, StoichError> {
    FormulaParser::default().parse(formula)
}

/// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, ElementCounts), StoichError> {
    FormulaParser::default().molar_mass(formula)
}

/// molecular weight of a formula or element in g/mol
pub fn molecular_weight(formula: &str) -> Result<f64, StoichError> {
    calculate_molar_mass(formula).map(|(molar_mass, _)| molar_mass)
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
) -> Result<Vec<f64>, StoichError> {
    vec_of_formulae
        .iter()
        .map(|formula| molecular_weight(formula))
        .collect()
}

pub fn create_elem_composition_matrix(
    vec_of_formulae: &[&str],
) -> Result<(DMatrix<f64>, Vec<String>), StoichError> {
    FormulaParser::default().composition_matrix(vec_of_formulae)
}
