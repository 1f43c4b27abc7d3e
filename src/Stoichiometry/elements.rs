//! Periodic table used by the formula parser and for molar mass calculation.
//!
//! Conventional atomic weights (g/mol) follow the IUPAC 2016 periodic table. Elements without
//! a standard atomic weight are still valid formula symbols but have `atomic_weight == None`,
//! so molar mass of a substance containing them cannot be computed.
use std::collections::HashMap;
use std::sync::LazyLock;

/// element data: symbol, name, atomic number, atomic weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_number: u32,
    pub atomic_weight: Option<f64>,
}

const fn el(
    symbol: &'static str,
    name: &'static str,
    atomic_number: u32,
    atomic_weight: Option<f64>,
) -> Element {
    Element {
        symbol,
        name,
        atomic_number,
        atomic_weight,
    }
}

/// all elements ordered by atomic number
pub const ELEMENTS: &[Element] = &[
    el("H", "hydrogen", 1, Some(1.008)),
    el("He", "helium", 2, Some(4.0026)),
    el("Li", "lithium", 3, Some(6.94)),
    el("Be", "beryllium", 4, Some(9.0122)),
    el("B", "boron", 5, Some(10.81)),
    el("C", "carbon", 6, Some(12.011)),
    el("N", "nitrogen", 7, Some(14.007)),
    el("O", "oxygen", 8, Some(15.999)),
    el("F", "fluorine", 9, Some(18.998)),
    el("Ne", "neon", 10, Some(20.180)),
    el("Na", "sodium", 11, Some(22.990)),
    el("Mg", "magnesium", 12, Some(24.305)),
    el("Al", "aluminium", 13, Some(26.982)),
    el("Si", "silicon", 14, Some(28.085)),
    el("P", "phosphorus", 15, Some(30.974)),
    el("S", "sulfur", 16, Some(32.06)),
    el("Cl", "chlorine", 17, Some(35.45)),
    el("Ar", "argon", 18, Some(39.948)),
    el("K", "potassium", 19, Some(39.098)),
    el("Ca", "calcium", 20, Some(40.078)),
    el("Sc", "scandium", 21, Some(44.956)),
    el("Ti", "titanium", 22, Some(47.867)),
    el("V", "vanadium", 23, Some(50.942)),
    el("Cr", "chromium", 24, Some(51.996)),
    el("Mn", "manganese", 25, Some(54.938)),
    el("Fe", "iron", 26, Some(55.845)),
    el("Co", "cobalt", 27, Some(58.933)),
    el("Ni", "nickel", 28, Some(58.693)),
    el("Cu", "copper", 29, Some(63.546)),
    el("Zn", "zinc", 30, Some(65.38)),
    el("Ga", "gallium", 31, Some(69.723)),
    el("Ge", "germanium", 32, Some(72.630)),
    el("As", "arsenic", 33, Some(74.922)),
    el("Se", "selenium", 34, Some(78.971)),
    el("Br", "bromine", 35, Some(79.904)),
    el("Kr", "krypton", 36, Some(83.798)),
    el("Rb", "rubidium", 37, Some(85.468)),
    el("Sr", "strontium", 38, Some(87.62)),
    el("Y", "yttrium", 39, Some(88.906)),
    el("Zr", "zirconium", 40, Some(91.224)),
    el("Nb", "niobium", 41, Some(92.906)),
    el("Mo", "molybdenum", 42, Some(95.95)),
    el("Tc", "technetium", 43, None),
    el("Ru", "ruthenium", 44, Some(101.07)),
    el("Rh", "rhodium", 45, Some(102.91)),
    el("Pd", "palladium", 46, Some(106.42)),
    el("Ag", "silver", 47, Some(107.87)),
    el("Cd", "cadmium", 48, Some(112.41)),
    el("In", "indium", 49, Some(114.82)),
    el("Sn", "tin", 50, Some(118.71)),
    el("Sb", "antimony", 51, Some(121.76)),
    el("Te", "tellurium", 52, Some(127.60)),
    el("I", "iodine", 53, Some(126.90)),
    el("Xe", "xenon", 54, Some(131.29)),
    el("Cs", "caesium", 55, Some(132.91)),
    el("Ba", "barium", 56, Some(137.33)),
    el("La", "lanthanum", 57, Some(138.91)),
    el("Ce", "cerium", 58, Some(140.12)),
    el("Pr", "praseodymium", 59, Some(140.91)),
    el("Nd", "neodymium", 60, Some(144.24)),
    el("Pm", "promethium", 61, None),
    el("Sm", "samarium", 62, Some(150.36)),
    el("Eu", "europium", 63, Some(151.96)),
    el("Gd", "gadolinium", 64, Some(157.25)),
    el("Tb", "terbium", 65, Some(158.93)),
    el("Dy", "dysprosium", 66, Some(162.50)),
    el("Ho", "holmium", 67, Some(164.93)),
    el("Er", "erbium", 68, Some(167.26)),
    el("Tm", "thulium", 69, Some(168.93)),
    el("Yb", "ytterbium", 70, Some(173.05)),
    el("Lu", "lutetium", 71, Some(174.97)),
    el("Hf", "hafnium", 72, Some(178.49)),
    el("Ta", "tantalum", 73, Some(180.95)),
    el("W", "tungsten", 74, Some(183.84)),
    el("Re", "rhenium", 75, Some(186.21)),
    el("Os", "osmium", 76, Some(190.23)),
    el("Ir", "iridium", 77, Some(192.22)),
    el("Pt", "platinum", 78, Some(195.08)),
    el("Au", "gold", 79, Some(196.97)),
    el("Hg", "mercury", 80, Some(200.59)),
    el("Tl", "thallium", 81, Some(204.38)),
    el("Pb", "lead", 82, Some(207.2)),
    el("Bi", "bismuth", 83, Some(208.98)),
    el("Po", "polonium", 84, None),
    el("At", "astatine", 85, None),
    el("Rn", "radon", 86, None),
    el("Fr", "francium", 87, None),
    el("Ra", "radium", 88, None),
    el("Ac", "actinium", 89, None),
    el("Th", "thorium", 90, Some(232.04)),
    el("Pa", "protactinium", 91, Some(231.04)),
    el("U", "uranium", 92, Some(238.03)),
    el("Np", "neptunium", 93, None),
    el("Pu", "plutonium", 94, None),
    el("Am", "americium", 95, None),
    el("Cm", "curium", 96, None),
    el("Bk", "berkelium", 97, None),
    el("Cf", "californium", 98, None),
    el("Es", "einsteinium", 99, None),
    el("Fm", "fermium", 100, None),
    el("Md", "mendelevium", 101, None),
    el("No", "nobelium", 102, None),
    el("Lr", "lawrencium", 103, None),
    el("Rf", "rutherfordium", 104, None),
    el("Db", "dubnium", 105, None),
    el("Sg", "seaborgium", 106, None),
    el("Bh", "bohrium", 107, None),
    el("Hs", "hassium", 108, None),
    el("Mt", "meitnerium", 109, None),
    el("Ds", "darmstadtium", 110, None),
    el("Rg", "roentgenium", 111, None),
    el("Cn", "copernicium", 112, None),
    el("Nh", "nihonium", 113, None),
    el("Fl", "flerovium", 114, None),
    el("Mc", "moscovium", 115, None),
    el("Lv", "livermorium", 116, None),
    el("Ts", "tennessine", 117, None),
    el("Og", "oganesson", 118, None),
];

// symbol -> position in ELEMENTS
static SYMBOL_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    ELEMENTS
        .iter()
        .enumerate()
        .map(|(i, element)| (element.symbol, i))
        .collect()
});

/// element data by symbol (case sensitive: "Co" is cobalt, "CO" is not an element)
pub fn element(symbol: &str) -> Option<&'static Element> {
    SYMBOL_INDEX.get(symbol).map(|&i| &ELEMENTS[i])
}

pub fn is_element(symbol: &str) -> bool {
    SYMBOL_INDEX.contains_key(symbol)
}

/// atomic weight in g/mol, None for unknown symbols and for elements without a standard weight
pub fn atomic_weight(symbol: &str) -> Option<f64> {
    element(symbol).and_then(|e| e.atomic_weight)
}
