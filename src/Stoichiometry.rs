/// Periodic table: symbols, names, atomic numbers and IUPAC conventional atomic weights
pub mod elements;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use ChemEq::Stoichiometry::molmass::{calculate_molar_mass, parse_formula};
/// let formula = "C6H8O6";
/// let (molar_mass, element_composition) = calculate_molar_mass(formula).unwrap();
/// println!("Element counts: {}", element_composition);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// let atomic_composition = parse_formula("(NH4)2SO4").unwrap();
/// assert_eq!(atomic_composition.get("H"), Some(8.0));
/// ```
pub mod molmass;
/// eng
/// The module takes as input a reaction equation specified as a String, e.g. "2 HCl + 2 Na -> 2 NaCl + H2",
/// and produces the following data:
/// 1) atomic composition of every reactant and product and the total number of atoms of each element on both sides
/// 2) total moles and masses of reactants and products
/// 3) molar weight, mass, mole fraction and mass fraction of every substance
/// 4) balance of atomic elements between reactants and products
///
/// Note: stoichiometric coefficients are taken from the text as they are, the module does not balance equations
/// # Examples
/// ```
/// use ChemEq::Stoichiometry::chemical_equation::ChemicalEquation;
/// let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None).unwrap();
/// assert!(ce.is_balanced());
/// println!("reactant elements: {}", ce.reactant_elements());
/// let hcl = ce.reactant_properties("HCl").unwrap();
/// assert!((hcl.mass_fraction - 0.613275).abs() < 1e-6);
/// ```
pub mod chemical_equation;
/// pretty printing and JSON export of chemical equation properties
pub mod chemical_equation_output;
mod chemical_equation_tests;
/// molecular weight of mixtures, mass fractions <-> mole fractions
pub mod mixtures;
pub mod stoich_errors;
