/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Stoichiometry::chemical_equation::{ChemicalEquation, Side};
    use crate::Stoichiometry::molmass::{ElementCounts, parse_formula};
    use crate::Stoichiometry::stoich_errors::StoichError;
    use crate::settings::StoichConfig;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn names(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_hcl_sodium() {
        let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None).unwrap();
        assert!(ce.names().is_none());
        assert!(ce.is_balanced());
        assert_eq!(
            *ce.reactant_elements(),
            ElementCounts::from([("H", 2.0), ("Cl", 2.0), ("Na", 2.0)])
        );
        assert_eq!(
            *ce.product_elements(),
            ElementCounts::from([("Na", 2.0), ("Cl", 2.0), ("H", 2.0)])
        );
        assert_relative_eq!(ce.reactant_moles(), 4.0);
        assert_relative_eq!(ce.product_moles(), 3.0);
        assert_relative_eq!(ce.reactant_mass(), 118.896, epsilon = 1e-9);
        assert_relative_eq!(ce.product_mass(), 118.896, epsilon = 1e-9);
    }

    #[test]
    fn test_reactant_properties() {
        let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None).unwrap();
        let hcl = ce.reactant_properties("HCl").unwrap();
        assert_eq!(hcl.name, "HCl");
        assert_eq!(hcl.species, "HCl");
        assert_relative_eq!(hcl.moles, 2.0);
        assert_relative_eq!(hcl.molar_weight, 36.458, epsilon = 1e-9);
        assert_relative_eq!(hcl.mass, 72.916, epsilon = 1e-9);
        assert_relative_eq!(hcl.mole_fraction, 0.5);
        assert_relative_eq!(hcl.mass_fraction, 0.613275, epsilon = 1e-6);

        let na = ce.reactant_properties("Na").unwrap();
        assert_relative_eq!(na.molar_weight, 22.99, epsilon = 1e-9);
        assert_relative_eq!(na.mass_fraction, 0.386725, epsilon = 1e-6);

        let table = ce.reactant_properties_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0], hcl);
        assert_eq!(table[1], na);
    }

    #[test]
    fn test_name_substitution() {
        let ce = ChemicalEquation::new(
            "5 NaCl + 3 H2O -> CH4 + 2.2 CHAR + CH2OHCHO",
            names(&[("CHAR", "C"), ("CH2OHCHO", "C2H4O2")]),
        )
        .unwrap();
        let expected = ElementCounts::from([("C", 5.2), ("H", 8.0), ("O", 2.0)]);
        assert!(ce.product_elements().approx_eq(&expected, 1e-9));
        assert_eq!(ce.product_elements().symbols(), vec!["C", "H", "O"]);

        let char_term = &ce.products()[1];
        assert_eq!(char_term.formula, "CHAR");
        assert_eq!(char_term.display_name, "CHAR");
        assert_eq!(char_term.species, "C");
        assert_relative_eq!(char_term.coefficient, 2.2);
        assert_eq!(char_term.elements, ElementCounts::from([("C", 1.0)]));
        assert!(char_term.total_elements.approx_eq(&ElementCounts::from([("C", 2.2)]), 1e-12));
        assert!(!ce.is_balanced());
    }

    #[test]
    fn test_unbalanced_with_substitution() {
        let ce = ChemicalEquation::new(
            "5 NaCl + 3 H2O -> CH4 + 2.2 CHAR + CH2OHCHO + GCO2",
            names(&[("CHAR", "C"), ("GCO2", "CO2")]),
        )
        .unwrap();
        assert!(!ce.is_balanced());
        let gco2 = ce.product_properties("GCO2").unwrap();
        assert_relative_eq!(gco2.moles, 1.0);
        assert_eq!(gco2.species, "CO2");
        assert_relative_eq!(gco2.molar_weight, 44.009, epsilon = 1e-9);
        assert_relative_eq!(gco2.mass, 44.009, epsilon = 1e-9);
        assert_relative_eq!(gco2.mole_fraction, 0.19230769, epsilon = 1e-8);
        assert_relative_eq!(gco2.mass_fraction, 0.300345, epsilon = 1e-6);
        let expected = ElementCounts::from([("C", 6.2), ("H", 8.0), ("O", 4.0)]);
        assert!(ce.product_elements().approx_eq(&expected, 1e-9));
        assert_relative_eq!(ce.product_moles(), 5.2, epsilon = 1e-12);
        assert_relative_eq!(ce.product_mass(), 146.5282, epsilon = 1e-9);
    }

    #[test]
    fn test_imbalance_is_not_an_error() {
        let ce = ChemicalEquation::new("2 HCl + 2 Na -> NaCl + H2", None).unwrap();
        assert!(!ce.is_balanced());
        let imbalance = ce.element_imbalance();
        assert_relative_eq!(imbalance.get("Na").unwrap(), -1.0);
        assert_relative_eq!(imbalance.get("Cl").unwrap(), -1.0);
        assert_relative_eq!(imbalance.get("H").unwrap(), 0.0);

        // element present only on one side
        let ce = ChemicalEquation::new("H2 + O2 -> H2O + N2", None).unwrap();
        assert!(!ce.is_balanced());
        assert_relative_eq!(ce.element_imbalance().get("N").unwrap(), 2.0);
    }

    #[test]
    fn test_balance_ignores_term_order() {
        let equations = [
            "CH4 + 2 O2 -> CO2 + 2 H2O",
            "2 O2 + CH4 -> 2 H2O + CO2",
            "2 O2 + CH4 -> CO2 + 2 H2O",
        ];
        for eq in equations {
            assert!(ChemicalEquation::new(eq, None).unwrap().is_balanced());
        }
        let unbalanced = ["CH4 + O2 -> CO2 + 2 H2O", "O2 + CH4 -> 2 H2O + CO2"];
        for eq in unbalanced {
            assert!(!ChemicalEquation::new(eq, None).unwrap().is_balanced());
        }
    }

    #[test]
    fn test_side_totals_are_sums_of_terms() {
        let ce = ChemicalEquation::new("3 Ca(OH)2 + 2 H3PO4 -> Ca3(PO4)2 + 6 H2O", None).unwrap();
        assert!(ce.is_balanced());
        for side in [Side::Reactants, Side::Products] {
            let s = ce.side(side);
            let mut summed = ElementCounts::new();
            for term in s.terms() {
                assert_eq!(
                    term.total_elements,
                    parse_formula(&term.species).unwrap().scaled(term.coefficient)
                );
                summed.merge(&term.total_elements, 1.0);
            }
            assert_eq!(summed, *s.elements());
            let moles: f64 = s.terms().iter().map(|t| t.coefficient).sum();
            assert_relative_eq!(s.moles(), moles);
            let mass: f64 = s.terms().iter().map(|t| t.coefficient * t.molar_mass).sum();
            assert_relative_eq!(s.mass(), mass, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let ce =
            ChemicalEquation::new("CH4 + 2 O2 + 7.52 N2 -> CO2 + 2 H2O + 7.52 N2", None).unwrap();
        assert!(ce.is_balanced());
        for fractions in [
            ce.reactant_mole_fractions(),
            ce.reactant_mass_fractions(),
            ce.product_mole_fractions(),
            ce.product_mass_fractions(),
        ] {
            assert_relative_eq!(fractions.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_coefficients() {
        let ce = ChemicalEquation::new("0 H2 -> 0 H2", None).unwrap();
        assert!(ce.is_balanced());
        assert_eq!(ce.reactant_moles(), 0.0);
        assert_eq!(ce.reactant_mole_fractions(), vec![0.0]);
        assert_eq!(ce.product_mass_fractions(), vec![0.0]);
    }

    #[test]
    fn test_coefficient_forms() {
        let ce = ChemicalEquation::new("2H2 + O2 -> 2 H2O", None).unwrap();
        assert!(ce.is_balanced());
        let coefficients: Vec<f64> = ce.reactants().iter().map(|t| t.coefficient).collect();
        assert_eq!(coefficients, vec![2.0, 1.0]);

        let ce = ChemicalEquation::new("0.5 O2 + H2 -> H2O", None).unwrap();
        assert!(ce.is_balanced());
        assert_eq!(ce.reactants()[0].formula, "O2");

        let ce = ChemicalEquation::new(".5 O2 + H2 -> H2O", None).unwrap();
        assert!(ce.is_balanced());
        assert_relative_eq!(ce.reactants()[0].coefficient, 0.5);
        assert_eq!(ce.reactants()[0].formula, "O2");

        let ce = ChemicalEquation::new("3 (NH4)2SO4 -> 3(NH4)2SO4", None).unwrap();
        assert!(ce.is_balanced());
        assert_relative_eq!(ce.products()[0].coefficient, 3.0);
    }

    #[test]
    fn test_arrows() {
        for eq in [
            "H2 + Cl2 -> 2 HCl",
            "H2 + Cl2 → 2 HCl",
            "H2 + Cl2 <=> 2 HCl",
            "H2 + Cl2 => 2 HCl",
        ] {
            let ce = ChemicalEquation::new(eq, None).unwrap();
            assert!(ce.is_balanced());
            assert_eq!(ce.products().len(), 1);
        }
        let config = StoichConfig {
            arrows: vec!["=".to_string()],
            ..StoichConfig::default()
        };
        let ce = ChemicalEquation::with_config("H2 + Cl2 = 2 HCl", None, &config).unwrap();
        assert!(ce.is_balanced());
    }

    #[test]
    fn test_balance_tolerance() {
        let ce = ChemicalEquation::new("CH1.0000001 -> CH", None).unwrap();
        assert!(ce.is_balanced());
        let strict = StoichConfig {
            balance_tolerance: 0.0,
            ..StoichConfig::default()
        };
        let ce = ChemicalEquation::with_config("CH1.0000001 -> CH", None, &strict).unwrap();
        assert!(!ce.is_balanced());
    }

    #[test]
    fn test_aliases() {
        let aliases = HashMap::from([("H2O".to_string(), "water".to_string())]);
        let ce = ChemicalEquation::with_aliases(
            "2 H2 + O2 -> 2 H2O",
            None,
            aliases,
            &StoichConfig::default(),
        )
        .unwrap();
        let water = ce.product_properties("water").unwrap();
        assert_eq!(water.name, "water");
        assert_eq!(water.species, "H2O");
        assert_eq!(ce.product_properties("H2O").unwrap(), water);
        assert!(ce.is_balanced());
    }

    #[test]
    fn test_composition_matrix() {
        let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None).unwrap();
        let (matrix, elements) = ce.composition_matrix();
        assert_eq!(elements, vec!["H", "Cl", "Na"]);
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 3);
        // H2 row
        assert_eq!(matrix[(3, 0)], 2.0);
        assert_eq!(matrix[(3, 1)], 0.0);
        // NaCl row
        assert_eq!(matrix[(2, 2)], 1.0);
    }

    #[test]
    fn test_species_not_found() {
        let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None).unwrap();
        match ce.product_properties("O2") {
            Err(StoichError::NotFound { species, side }) => {
                assert_eq!(species, "O2");
                assert_eq!(side, "products");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(ce.reactant_properties("NaCl").is_err());
        assert!(ce.product_properties("NaCl").is_ok());
    }

    #[test]
    fn test_equation_format_errors() {
        let bad_equations = [
            "2 HCl + 2 Na",
            "A -> B -> C",
            "H2 + -> H2",
            "H2 -> ",
            "2 -> H2",
            "Ca(OH2 -> CaO + H2O",
            "Xx2 -> H2",
        ];
        for eq in bad_equations {
            match ChemicalEquation::new(eq, None) {
                Err(StoichError::Format { .. }) => {}
                other => panic!("expected format error for {:?}, got {:?}", eq, other),
            }
        }
        let err = ChemicalEquation::new("2 HCl + 2 Na", None).unwrap_err();
        assert!(err.to_string().contains("2 HCl + 2 Na"));
    }

    #[test]
    fn test_unknown_atomic_weight_fails_construction() {
        match ChemicalEquation::new("TcO2 -> Tc + O2", None) {
            Err(StoichError::UnknownElement { symbol, .. }) => assert_eq!(symbol, "Tc"),
            other => panic!("expected UnknownElement, got {:?}", other),
        }
    }

    #[test]
    fn test_phase_marks_in_equation() {
        let ce = ChemicalEquation::new("2 H2(g) + O2(g) -> 2 H2O(l)", None).unwrap();
        assert!(ce.is_balanced());
        assert_eq!(ce.products()[0].formula, "H2O(l)");
        assert_relative_eq!(ce.products()[0].molar_mass, 18.015, epsilon = 1e-9);
    }

    #[test]
    fn test_sulfur_group_is_kept() {
        let ce = ChemicalEquation::new("Fe + S -> Fe(S)", None).unwrap();
        assert!(ce.is_balanced());
        assert_eq!(
            ce.products()[0].elements,
            ElementCounts::from([("Fe", 1.0), ("S", 1.0)])
        );
    }

    #[test]
    fn test_overflowing_coefficient() {
        let equation = format!("{} H2 -> H2", "9".repeat(400));
        match ChemicalEquation::new(&equation, None) {
            Err(StoichError::Format { reason, .. }) => assert!(reason.contains("too large")),
            other => panic!("expected format error, got {:?}", other),
        }
        let equation = format!("H{} -> H2", "9".repeat(400));
        assert!(matches!(
            ChemicalEquation::new(&equation, None),
            Err(StoichError::Format { .. })
        ));
    }
}
