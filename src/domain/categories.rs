//! Category catalogue offered to users. Categories stay free-form strings;
//! these lists only seed pickers and filters.

use crate::domain::common::Direction;

pub const INCOME_CATEGORIES: &[&str] = &[
    "Renta de Generadores",
    "Servicios Adicionales",
    "Mantenimiento",
    "Instalación",
    "Capacitación",
    "Depósitos",
    "Reembolsos",
    "Otros Ingresos",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Mantenimiento",
    "Combustible",
    "Transporte",
    "Almacenamiento",
    "Seguros",
    "Nómina",
    "Impuestos",
    "Servicios",
    "Materiales",
    "Herramientas",
    "Marketing",
    "Capacitación",
    "Otros Gastos",
];

pub fn categories_for(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::Income => INCOME_CATEGORIES,
        Direction::Expense => EXPENSE_CATEGORIES,
    }
}

/// Income categories followed by expense categories, without duplicates.
pub fn all_categories() -> Vec<&'static str> {
    let mut seen = Vec::with_capacity(INCOME_CATEGORIES.len() + EXPENSE_CATEGORIES.len());
    for name in INCOME_CATEGORIES.iter().chain(EXPENSE_CATEGORIES) {
        if !seen.contains(name) {
            seen.push(*name);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_list_drops_shared_names() {
        let all = all_categories();
        let shared = all.iter().filter(|name| **name == "Mantenimiento").count();
        assert_eq!(shared, 1);
        assert_eq!(all.first(), Some(&"Renta de Generadores"));
        assert_eq!(all.last(), Some(&"Otros Gastos"));
    }
}
