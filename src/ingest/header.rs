use tracing::debug;

use crate::search::strip_accents;

/// Canonical key for a header cell or a description slug.
///
/// Accents are stripped, letters lowercased, and every run of characters
/// outside `[a-z0-9]` becomes a single `_`, trimmed at both ends.
pub fn normalize_key(raw: &str) -> String {
    let folded = strip_accents(raw).to_lowercase();
    let mut key = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c);
        } else {
            pending_sep = true;
        }
    }
    key
}

/// Logical columns a nutrition table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Group,
    Description,
    Kcal,
    Protein,
    Fat,
    Carbs,
    Fiber,
    Sodium,
    Potassium,
    Calcium,
    Iron,
    VitaminC,
}

impl Field {
    pub const COUNT: usize = 13;

    pub const ALL: [Field; Field::COUNT] = [
        Field::Id,
        Field::Group,
        Field::Description,
        Field::Kcal,
        Field::Protein,
        Field::Fat,
        Field::Carbs,
        Field::Fiber,
        Field::Sodium,
        Field::Potassium,
        Field::Calcium,
        Field::Iron,
        Field::VitaminC,
    ];

    /// Columns without which a file is rejected.
    pub const REQUIRED: [Field; 2] = [Field::Description, Field::Kcal];

    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Group => "group",
            Field::Description => "description",
            Field::Kcal => "kcal",
            Field::Protein => "protein",
            Field::Fat => "fat",
            Field::Carbs => "carbs",
            Field::Fiber => "fiber",
            Field::Sodium => "sodium",
            Field::Potassium => "potassium",
            Field::Calcium => "calcium",
            Field::Iron => "iron",
            Field::VitaminC => "vitamin_c",
        }
    }

    /// Accepted normalized header spellings, most specific first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Id => &["numero_do_alimento", "numero", "codigo", "cod", "id"],
            Field::Group => &["categoria_do_alimento", "categoria", "grupo", "group"],
            Field::Description => &[
                "descricao_do_alimento",
                "descricao",
                "alimento",
                "description",
                "nome",
            ],
            Field::Kcal => &["energia_kcal", "energia", "kcal", "energy_kcal"],
            Field::Protein => &["proteina_g", "proteina", "protein"],
            Field::Fat => &[
                "lipideos_g",
                "lipideos",
                "lipidios_g",
                "lipidios",
                "gordura_g",
                "gordura",
                "fat",
            ],
            Field::Carbs => &["carboidrato_g", "carboidrato", "carboidratos", "carbs"],
            Field::Fiber => &["fibra_alimentar_g", "fibra_alimentar", "fibra", "fiber"],
            Field::Sodium => &["sodio_mg", "sodio", "sodium"],
            Field::Potassium => &["potassio_mg", "potassio", "potassium"],
            Field::Calcium => &["calcio_mg", "calcio", "calcium"],
            Field::Iron => &["ferro_mg", "ferro", "iron"],
            Field::VitaminC => &["vitamina_c_mg", "vitamina_c", "vitamin_c"],
        }
    }
}

/// Header position of each logical field, `None` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; Field::COUNT],
}

impl ColumnMap {
    /// Resolve each field to the first header whose normalized form is one of its aliases.
    pub fn resolve<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers.into_iter().map(normalize_key).collect();
        let mut map = Self::default();
        for field in Field::ALL {
            let aliases = field.aliases();
            map.indices[field as usize] =
                normalized.iter().position(|h| aliases.contains(&h.as_str()));
        }
        debug!(headers = ?normalized, columns = ?map, "resolved table columns");
        map
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.indices[field as usize]
    }

    /// Required fields that did not resolve.
    pub fn missing_required(&self) -> Vec<&'static str> {
        Field::REQUIRED
            .into_iter()
            .filter(|f| self.index(*f).is_none())
            .map(Field::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Descrição do Alimento"), "descricao_do_alimento");
        assert_eq!(normalize_key("Energia (kcal)"), "energia_kcal");
        assert_eq!(normalize_key("  __Proteína (g)__ "), "proteina_g");
        assert_eq!(normalize_key("Vitamina C (mg)"), "vitamina_c_mg");
        assert_eq!(normalize_key("***"), "");
    }

    #[test]
    fn test_resolve_first_matching_header() {
        let map = ColumnMap::resolve([
            "Número do Alimento",
            "Descrição",
            "Alimento",
            "Energia (kcal)",
            "Energia (kJ)",
        ]);
        assert_eq!(map.index(Field::Id), Some(0));
        assert_eq!(map.index(Field::Description), Some(1));
        assert_eq!(map.index(Field::Kcal), Some(3));
        assert_eq!(map.index(Field::Protein), None);
        assert!(map.missing_required().is_empty());
    }

    #[test]
    fn test_missing_required() {
        let map = ColumnMap::resolve(["nome do produto", "Energia (kJ)"]);
        assert_eq!(map.missing_required(), vec!["description", "kcal"]);
    }
}
