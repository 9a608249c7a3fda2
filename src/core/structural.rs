// =============================================================================
// STRUCTURAL — Le trait d'introspection structurelle
// =============================================================================
//
// Le moteur de copie n'a besoin que de quatre choses sur un type :
//   - le nom de chacun de ses champs
//   - le type déclaré de chacun de ses champs
//   - son inscriptibilité (un champ privé n'est jamais copié)
//   - un slot affectable pour y déposer la valeur copiée
//
// Plutôt que de la réflexion ambiante, on expose cette capacité comme un
// trait explicite, à la manière du trait Backend : tout type qui sait se
// décrire champ par champ peut passer par le moteur, y compris une struct
// Rust native implémentée à la main (voir les tests).
//
// Record implémente Structural trivialement — c'est la forme dynamique.
// Les champs sont adressés par INDICE (0..field_count) : la correspondance
// par NOM est l'affaire du moteur, pas du trait.
//
// =============================================================================

use super::record::Record;
use super::typetag::TypeTag;
use super::value::Value;

/// La description d'un champ, sans sa valeur.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor<'a> {
    /// Nom du champ
    pub name: &'a str,
    /// Type déclaré
    pub declared: &'a TypeTag,
    /// Faux pour un champ privé : la copie le sautera en silence
    pub writable: bool,
}

/// La capacité « descriptible structurellement » : tout ce que le moteur
/// de copie exige d'un type.
pub trait Structural {
    /// Nom du type (l'identité nominale)
    fn type_name(&self) -> &str;

    /// Nombre de champs, en ordre de déclaration
    fn field_count(&self) -> usize;

    /// Descripteur du champ d'indice i (i < field_count)
    fn descriptor(&self, index: usize) -> FieldDescriptor<'_>;

    /// Instantané SUPERFICIEL de la valeur du champ d'indice i : les
    /// genres conteneur reviennent aliasés (même stockage sous-jacent).
    fn value(&self, index: usize) -> Value;

    /// Le slot affectable : dépose une valeur dans le champ d'indice i.
    /// Le moteur n'appelle ce slot qu'après avoir vérifié nom,
    /// inscriptibilité et compatibilité de type.
    fn set_value(&mut self, index: usize, value: Value);
}

impl Structural for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn descriptor(&self, index: usize) -> FieldDescriptor<'_> {
        let field = &self.fields[index];
        FieldDescriptor {
            name: &field.name,
            declared: &field.declared,
            writable: field.writable,
        }
    }

    fn value(&self, index: usize) -> Value {
        self.fields[index].value.clone()
    }

    fn set_value(&mut self, index: usize, value: Value) {
        self.fields[index].value = value;
    }
}
