use crate::Stoichiometry::chemical_equation::{ChemicalEquation, Side};
use crate::Stoichiometry::mixtures::{massfrac_to_molefrac, molefrac_to_massfrac, mw_mix};
use crate::Stoichiometry::molmass::{
    ElementCounts, FormulaParser, calculate_molar_mass, create_elem_composition_matrix,
    molecular_weight,
};
use crate::Stoichiometry::stoich_errors::StoichError;
use crate::settings::StoichConfig;
use approx::assert_relative_eq;
use std::collections::HashMap;

pub fn stoich_examples(task: usize) -> Result<(), StoichError> {
    match task {
        0 => {
            // balanced equation, totals and properties of reactants and products
            let ce = ChemicalEquation::new("2 HCl + 2 Na -> 2 NaCl + H2", None)?;
            println!("{}", ce);
            println!("Equation is balanced: {}", ce.is_balanced());
            println!("\nTotal product elements: {}", ce.product_elements());
            println!("Total product moles: {}", ce.product_moles());
            println!("Total product mass: {:.4}", ce.product_mass());
            println!("\nTotal reactant elements: {}", ce.reactant_elements());
            println!("Total reactant moles: {}", ce.reactant_moles());
            println!("Total reactant mass: {:.4}", ce.reactant_mass());
            ce.properties_table_view(Side::Products).printstd();
            ce.properties_table_view(Side::Reactants).printstd();
            assert_relative_eq!(ce.reactant_mass(), 118.896, epsilon = 1e-6);
        }
        1 => {
            // tokens of the equation that are not formulas are resolved with the names map
            let names = HashMap::from([
                ("CHAR".to_string(), "C".to_string()),
                ("CH2OHCHO".to_string(), "C2H4O2".to_string()),
            ]);
            let ce =
                ChemicalEquation::new("5 NaCl + 3 H2O -> CH4 + 2.2 CHAR + CH2OHCHO", Some(names))?;
            ce.pretty_print();
            println!("products - reactants: {}", ce.element_imbalance());
        }
        2 => {
            //  Calculation of atomic composition, molar masses and matrix of atomic composition
            let (molar_mass, element_composition) = calculate_molar_mass("C6H8O6")?;
            println!("Element counts: {}", element_composition);
            println!("Molar mass: {:?} g/mol", molar_mass);
            println!("(NH4)2SO4: {} g/mol", molecular_weight("(NH4)2SO4")?);

            let groups = HashMap::from([(
                "Me".to_string(),
                ElementCounts::from([("C", 1.0), ("H", 3.0)]),
            )]);
            let xylene = FormulaParser::with_groups(groups).parse("C6H4(Me)2")?;
            println!("xylene: {}", xylene);

            let (matrix, elements) =
                create_elem_composition_matrix(&["H2O", "NaCl", "C3H8", "CH4"])?;
            println!("elements: {:?} {}", elements, matrix);
        }
        3 => {
            // mixtures
            let mws = [molecular_weight("H2")?, molecular_weight("N2")?];
            println!("mixture molecular weight: {}", mw_mix(&mws, &[0.8, 0.2])?);
            let mw = [12.011, 1.008, 15.999, 14.007];
            println!("mole fractions: {:?}", massfrac_to_molefrac(&[0.36, 0.16, 0.20, 0.28], &mw)?);
            println!("mass fractions: {:?}", molefrac_to_massfrac(&[0.36, 0.16, 0.20, 0.28], &mw)?);
        }
        4 => {
            // settings
            let config = StoichConfig::load("stoich_config.json")?;
            let ce = ChemicalEquation::with_config("CH4 + 2 O2 → CO2 + 2 H2O(g)", None, &config)?;
            println!("{}: balanced {}", ce, ce.is_balanced());
            println!("{}", serde_json::to_string_pretty(&ce.properties_to_json())?);
        }
        _ => println!("no such example: {}", task),
    }
    Ok(())
}
