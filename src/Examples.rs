/// formula parsing, chemical equations, mixtures
pub mod stoichiometry_examples;
