use super::chemical_equation::{ChemicalEquation, EquationSide, Side, Term};
use super::stoich_errors::StoichError;
use prettytable::{Table, row};
use serde_json::{Value, json};
use std::fmt;
use std::fs::File;
use std::io::Write;

impl ChemicalEquation {
    ////////////////////////INPUT/OUTPUT////////////////////////////////////////////////////////

    /// table of moles, species, molar weight, mass, mole fraction and mass fraction for one side
    pub fn properties_table_view(&self, side: Side) -> Table {
        let mut table = Table::new();
        table.add_row(row!["name", "moles", "species", "molwt", "mass", "molfrac", "massfrac"]);
        for p in self.side(side).properties_table() {
            table.add_row(row![
                p.name,
                p.moles,
                p.species,
                format!("{:.4}", p.molar_weight),
                format!("{:.4}", p.mass),
                format!("{:.6}", p.mole_fraction),
                format!("{:.6}", p.mass_fraction),
            ]);
        }
        table
    }

    /// Prints totals and properties of both sides to the console
    pub fn pretty_print(&self) {
        println!("__________{}__________", self.equation());
        println!("Equation is balanced: {}", self.is_balanced());
        for side in [Side::Reactants, Side::Products] {
            let s = self.side(side);
            println!("\n_________{}_________", side.as_str().to_uppercase());
            println!("Total elements: {}", s.elements());
            println!("Total moles: {}", s.moles());
            println!("Total mass: {:.4}", s.mass());
            self.properties_table_view(side).printstd();
        }
        println!("_____________________________________________________________");
    }

    fn side_to_json(side: &EquationSide) -> Value {
        json!({
            "elements": side.elements(),
            "moles": side.moles(),
            "mass": side.mass(),
            "properties": side.properties_table(),
        })
    }

    /// Totals and properties tables of both sides as a JSON value
    pub fn properties_to_json(&self) -> Value {
        json!({
            "equation": self.equation(),
            "balanced": self.is_balanced(),
            "reactants": Self::side_to_json(self.side(Side::Reactants)),
            "products": Self::side_to_json(self.side(Side::Products)),
        })
    }

    pub fn save_properties_to_json(&self, file_name: &str) -> Result<(), StoichError> {
        let mut file = File::create(file_name)?;
        let content = serde_json::to_string_pretty(&self.properties_to_json())?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_terms(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " + ")?;
        }
        if term.coefficient != 1.0 {
            write!(f, "{} ", term.coefficient)?;
        }
        write!(f, "{}", term.formula)?;
    }
    Ok(())
}

/// normalized form of the equation: "2 HCl + 2 Na -> 2 NaCl + H2"
impl fmt::Display for ChemicalEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, self.reactants())?;
        write!(f, " -> ")?;
        write_terms(f, self.products())
    }
}
