//! # Chemical equation
//!
//! ## Aim
//! Properties of the reactants and products of a chemical equation written as text,
//! e.g. `"2 HCl + 2 Na -> 2 NaCl + H2"`.
//!
//! ## Main Data Structures and Logic
//! - `Term`: one reactant or product: stoichiometric coefficient, formula as written, display name,
//!   formula actually resolved into atoms (species), atomic composition, molar mass and mass
//! - `EquationSide`: ordered terms of one side with total atomic composition, moles and mass
//! - `ChemicalEquation`: both sides, computed once at construction and never changed afterwards
//!
//! ## Name substitution
//! A term may be written with an arbitrary token (e.g. `CHAR` for char carbon). The optional
//! `names` map sends such a token (coefficient stripped) to the formula used for counting atoms
//! and molar mass, while the token itself is kept as display name:
//! ```rust
//! use ChemEq::Stoichiometry::chemical_equation::ChemicalEquation;
//! use std::collections::HashMap;
//! let names = HashMap::from([("CHAR".to_string(), "C".to_string())]);
//! let ce = ChemicalEquation::new("C + O2 -> CO2 + 0 CHAR", Some(names)).unwrap();
//! assert!(ce.is_balanced());
//! assert_eq!(ce.product_properties("CHAR").unwrap().species, "C");
//! ```
//!
//! The crate only checks the balance of the coefficients given in the text, it never computes them.
use super::molmass::{ElementCounts, FormulaParser, composition_matrix_of, molar_mass_of_counts};
use super::stoich_errors::StoichError;
use crate::settings::StoichConfig;
use log::{debug, info, warn};
use nalgebra::DMatrix;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

// optional leading decimal coefficient (2, 2.5 or .5) followed by the formula
static TERM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<coefficient>\d*\.?\d+)?\s*(?P<formula>.+)$").expect("valid term regex")
});

/// side of a chemical equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Reactants,
    Products,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Reactants => "reactants",
            Side::Products => "products",
        }
    }
}

/// one reactant or product of the equation
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    /// stoichiometric coefficient, 1 if not written
    pub coefficient: f64,
    /// formula as written in the equation
    pub formula: String,
    /// label used for display and lookup
    pub display_name: String,
    /// formula resolved into atoms, differs from `formula` when a name substitution applies
    pub species: String,
    /// atoms in one formula unit
    pub elements: ElementCounts,
    /// atoms multiplied by the coefficient
    pub total_elements: ElementCounts,
    /// g/mol
    pub molar_mass: f64,
    /// coefficient * molar mass
    pub mass: f64,
}

/// One row of the properties table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesProperties {
    pub name: String,
    pub moles: f64,
    pub species: String,
    pub molar_weight: f64,
    pub mass: f64,
    pub mole_fraction: f64,
    pub mass_fraction: f64,
}

/// reactants or products with their totals
#[derive(Debug, Clone, Serialize)]
pub struct EquationSide {
    side: Side,
    terms: Vec<Term>,
    elements: ElementCounts,
    moles: f64,
    mass: f64,
}

fn fraction(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}

impl EquationSide {
    fn new(side: Side, terms: Vec<Term>) -> Self {
        let mut elements = ElementCounts::new();
        for term in &terms {
            elements.merge(&term.total_elements, 1.0);
        }
        let moles: f64 = terms.iter().map(|t| t.coefficient).sum();
        let mass: f64 = terms.iter().map(|t| t.mass).sum();
        if moles == 0.0 {
            warn!("total moles of {} is zero, fractions are set to zero", side.as_str());
        }
        Self {
            side,
            terms,
            elements,
            moles,
            mass,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// total number of atoms of each element on this side
    pub fn elements(&self) -> &ElementCounts {
        &self.elements
    }

    pub fn moles(&self) -> f64 {
        self.moles
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn mole_fractions(&self) -> Vec<f64> {
        self.terms
            .iter()
            .map(|t| fraction(t.coefficient, self.moles))
            .collect()
    }

    pub fn mass_fractions(&self) -> Vec<f64> {
        self.terms
            .iter()
            .map(|t| fraction(t.mass, self.mass))
            .collect()
    }

    fn row(&self, term: &Term) -> SpeciesProperties {
        SpeciesProperties {
            name: term.display_name.clone(),
            moles: term.coefficient,
            species: term.species.clone(),
            molar_weight: term.molar_mass,
            mass: term.mass,
            mole_fraction: fraction(term.coefficient, self.moles),
            mass_fraction: fraction(term.mass, self.mass),
        }
    }

    /// moles, species, molar weight, mass, mole fraction and mass fraction of every term
    pub fn properties_table(&self) -> Vec<SpeciesProperties> {
        self.terms.iter().map(|t| self.row(t)).collect()
    }

    /// first term whose display name, resolved species or written formula equals `species`
    pub fn properties(&self, species: &str) -> Result<SpeciesProperties, StoichError> {
        self.terms
            .iter()
            .find(|t| t.display_name == species)
            .or_else(|| {
                self.terms
                    .iter()
                    .find(|t| t.species == species || t.formula == species)
            })
            .map(|t| self.row(t))
            .ok_or_else(|| StoichError::NotFound {
                species: species.to_string(),
                side: self.side.as_str().to_string(),
            })
    }
}

/// Properties of the reactants and products in a given chemical equation
#[derive(Debug, Clone, Serialize)]
pub struct ChemicalEquation {
    equation: String,
    names: Option<HashMap<String, String>>,
    reactants: EquationSide,
    products: EquationSide,
    balance_tolerance: f64,
}

impl ChemicalEquation {
    /// Parses the equation with default settings. `names` maps tokens of the equation to the chemical
    /// formulas used for atoms and molar mass.
    pub fn new(
        equation: &str,
        names: Option<HashMap<String, String>>,
    ) -> Result<Self, StoichError> {
        Self::with_config(equation, names, &StoichConfig::default())
    }

    pub fn with_config(
        equation: &str,
        names: Option<HashMap<String, String>>,
        config: &StoichConfig,
    ) -> Result<Self, StoichError> {
        Self::with_aliases(equation, names, HashMap::new(), config)
    }

    /// Like `with_config`, additionally `aliases` sets display names of terms (keyed by the formula as
    /// written) independently of what the term resolves to.
    pub fn with_aliases(
        equation: &str,
        names: Option<HashMap<String, String>>,
        aliases: HashMap<String, String>,
        config: &StoichConfig,
    ) -> Result<Self, StoichError> {
        config.validate()?;
        let parser = FormulaParser::new().strip_phase_marks(config.strip_phase_marks);
        let (reactant_text, product_text) = split_on_arrow(equation, &config.arrows)?;
        let substitutions = names.clone().unwrap_or_default();

        let reactant_terms =
            parse_side(equation, reactant_text, &substitutions, &aliases, &parser)?;
        let product_terms = parse_side(equation, product_text, &substitutions, &aliases, &parser)?;
        let ce = ChemicalEquation {
            equation: equation.to_string(),
            names,
            reactants: EquationSide::new(Side::Reactants, reactant_terms),
            products: EquationSide::new(Side::Products, product_terms),
            balance_tolerance: config.balance_tolerance,
        };
        info!(
            "equation '{}' parsed: {} reactants, {} products",
            equation,
            ce.reactants.terms.len(),
            ce.products.terms.len()
        );
        Ok(ce)
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn names(&self) -> Option<&HashMap<String, String>> {
        self.names.as_ref()
    }

    pub fn side(&self, side: Side) -> &EquationSide {
        match side {
            Side::Reactants => &self.reactants,
            Side::Products => &self.products,
        }
    }

    pub fn reactants(&self) -> &[Term] {
        self.reactants.terms()
    }

    pub fn products(&self) -> &[Term] {
        self.products.terms()
    }

    /// total number of atoms of each element on the reactant side
    pub fn reactant_elements(&self) -> &ElementCounts {
        self.reactants.elements()
    }

    /// total number of atoms of each element on the product side
    pub fn product_elements(&self) -> &ElementCounts {
        self.products.elements()
    }

    pub fn reactant_moles(&self) -> f64 {
        self.reactants.moles()
    }

    pub fn product_moles(&self) -> f64 {
        self.products.moles()
    }

    pub fn reactant_mass(&self) -> f64 {
        self.reactants.mass()
    }

    pub fn product_mass(&self) -> f64 {
        self.products.mass()
    }

    pub fn reactant_mole_fractions(&self) -> Vec<f64> {
        self.reactants.mole_fractions()
    }

    pub fn reactant_mass_fractions(&self) -> Vec<f64> {
        self.reactants.mass_fractions()
    }

    pub fn product_mole_fractions(&self) -> Vec<f64> {
        self.products.mole_fractions()
    }

    pub fn product_mass_fractions(&self) -> Vec<f64> {
        self.products.mass_fractions()
    }

    pub fn reactant_properties_table(&self) -> Vec<SpeciesProperties> {
        self.reactants.properties_table()
    }

    pub fn product_properties_table(&self) -> Vec<SpeciesProperties> {
        self.products.properties_table()
    }

    pub fn reactant_properties(&self, species: &str) -> Result<SpeciesProperties, StoichError> {
        self.reactants.properties(species)
    }

    pub fn product_properties(&self, species: &str) -> Result<SpeciesProperties, StoichError> {
        self.products.properties(species)
    }

    /// Balance between atomic elements in reactants and products: the same elements on both sides
    /// with equal numbers of atoms
    pub fn is_balanced(&self) -> bool {
        let balanced = self
            .reactants
            .elements
            .approx_eq(&self.products.elements, self.balance_tolerance);
        if !balanced {
            debug!(
                "equation '{}' is not balanced, products - reactants: {}",
                self.equation,
                self.element_imbalance()
            );
        }
        balanced
    }

    /// atoms of products minus atoms of reactants for every element found in the equation
    pub fn element_imbalance(&self) -> ElementCounts {
        let mut imbalance = self.products.elements.clone();
        imbalance.merge(&self.reactants.elements, -1.0);
        imbalance
    }

    /// atomic composition of every species, rows are reactants followed by products
    pub fn composition_matrix(&self) -> (DMatrix<f64>, Vec<String>) {
        let compositions: Vec<ElementCounts> = self
            .reactants
            .terms
            .iter()
            .chain(self.products.terms.iter())
            .map(|t| t.elements.clone())
            .collect();
        composition_matrix_of(&compositions)
    }
}

/// splits the equation on the only arrow token; longer tokens win at the same position
fn split_on_arrow<'a>(
    equation: &'a str,
    arrows: &[String],
) -> Result<(&'a str, &'a str), StoichError> {
    let mut arrows: Vec<&str> = arrows.iter().map(|a| a.as_str()).collect();
    arrows.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut found: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < equation.len() {
        let rest = &equation[i..];
        match arrows.iter().find(|arrow| rest.starts_with(**arrow)) {
            Some(arrow) => {
                found.push((i, arrow.len()));
                i += arrow.len();
            }
            None => i += rest.chars().next().map_or(1, |c| c.len_utf8()),
        }
    }
    match found.as_slice() {
        [(start, len)] => Ok((&equation[..*start], &equation[start + len..])),
        [] => Err(StoichError::format(
            equation,
            format!("no reaction arrow found, expected one of {:?}", arrows),
        )),
        _ => Err(StoichError::format(
            equation,
            format!(
                "{} reaction arrows found at positions {:?}, expected exactly one",
                found.len(),
                found.iter().map(|(start, _)| *start).collect::<Vec<_>>()
            ),
        )),
    }
}

fn parse_side(
    equation: &str,
    side_text: &str,
    names: &HashMap<String, String>,
    aliases: &HashMap<String, String>,
    parser: &FormulaParser,
) -> Result<Vec<Term>, StoichError> {
    side_text
        .split('+')
        .map(|term_text| parse_term(equation, term_text.trim(), names, aliases, parser))
        .collect()
}

fn parse_term(
    equation: &str,
    term_text: &str,
    names: &HashMap<String, String>,
    aliases: &HashMap<String, String>,
    parser: &FormulaParser,
) -> Result<Term, StoichError> {
    if term_text.is_empty() {
        return Err(StoichError::format(equation, "empty term"));
    }
    let caps = TERM_REGEX
        .captures(term_text)
        .ok_or_else(|| StoichError::format(equation, format!("malformed term '{}'", term_text)))?;
    let formula = caps["formula"].trim().to_string();
    if formula.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(StoichError::format(
            equation,
            format!("malformed coefficient or missing formula in term '{}'", term_text),
        ));
    }
    let coefficient = match caps.name("coefficient") {
        Some(m) => m.as_str().parse::<f64>().map_err(|e| {
            StoichError::format(
                equation,
                format!("malformed coefficient '{}': {}", m.as_str(), e),
            )
        })?,
        None => 1.0,
    };
    if !coefficient.is_finite() {
        return Err(StoichError::format(
            equation,
            format!("coefficient of term '{}' is too large", formula),
        ));
    }
    let species = names.get(&formula).cloned().unwrap_or_else(|| formula.clone());
    let display_name = aliases.get(&formula).cloned().unwrap_or_else(|| formula.clone());
    debug!(
        "term '{}': coefficient {}, formula {}, species {}",
        term_text, coefficient, formula, species
    );

    let elements = parser.parse(&species)?;
    let molar_mass = molar_mass_of_counts(&elements, &species)?;
    let total_elements = elements.scaled(coefficient);
    Ok(Term {
        coefficient,
        formula,
        display_name,
        species,
        elements,
        total_elements,
        molar_mass,
        mass: coefficient * molar_mass,
    })
}
