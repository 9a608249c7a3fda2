// =============================================================================
// TYPETAG — Les étiquettes de type du système
// =============================================================================
//
// Chaque champ d'un record porte un type DÉCLARÉ, et chaque valeur vivante
// porte un type CONSTATÉ à l'exécution. Les deux sont décrits par la même
// étiquette : TypeTag.
//
// ANALOGIE : TypeTag joue le rôle de reflect.Type — une description de forme,
// sans aucune donnée. La valeur elle-même vit dans Value (module voisin).
//
// Deux familles d'étiquettes :
//   - Les GENRES VALEUR (Int, Float, Bool, Str, Array de genres valeur) :
//     aucune indirection, aucun stockage partagé possible. Ils se copient
//     toujours par valeur, quel que soit le mode.
//   - Les GENRES CONTENEUR (Ptr, Seq, Map, Record, Chan) : un stockage
//     sous-jacent qui peut être partagé (shallow) ou reconstruit (deep).
//
// L'ASSIGNABILITÉ est l'identité structurelle, et nominale pour les records
// (même nom de type). Pas d'élargissement numérique : un Int ne se copie
// jamais dans un Float.
//
// =============================================================================

use std::fmt;

/// Une étiquette de type : la forme déclarée d'un champ ou la forme
/// constatée d'une valeur à l'exécution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// Entier signé 64 bits
    Int,
    /// Nombre à virgule flottante
    Float,
    /// Booléen
    Bool,
    /// Chaîne de caractères
    Str,
    /// Tableau de taille fixe (genres valeur uniquement)
    Array(Box<TypeTag>, usize),
    /// Pointeur nullable vers une valeur du type pointé
    Ptr(Box<TypeTag>),
    /// Séquence ordonnée redimensionnable (le slice)
    Seq(Box<TypeTag>),
    /// Conteneur associatif clé → valeur
    Map(Box<TypeTag>, Box<TypeTag>),
    /// Record nommé (l'identité est nominale : même nom = même type)
    Record(String),
    /// Canal de communication (poignée non possédante)
    Chan(Box<TypeTag>),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "Int"),
            TypeTag::Float => write!(f, "Float"),
            TypeTag::Bool => write!(f, "Bool"),
            TypeTag::Str => write!(f, "Str"),
            TypeTag::Array(elem, n) => write!(f, "[{}]{}", n, elem),
            TypeTag::Ptr(elem) => write!(f, "*{}", elem),
            TypeTag::Seq(elem) => write!(f, "[]{}", elem),
            TypeTag::Map(k, v) => write!(f, "map[{}]{}", k, v),
            TypeTag::Record(name) => write!(f, "{}", name),
            TypeTag::Chan(elem) => write!(f, "chan {}", elem),
        }
    }
}

impl TypeTag {
    /// Le type constaté `runtime` peut-il être affecté à un champ déclaré
    /// de ce type ? Identité structurelle, nominale pour les records.
    ///
    /// Volontairement strict : pas d'élargissement numérique (Int → Float
    /// est refusé), c'est hors périmètre du moteur.
    pub fn accepts(&self, runtime: &TypeTag) -> bool {
        self == runtime
    }

    /// Un genre valeur ne porte aucune indirection : il se copie par valeur
    /// sous les deux modes (nombres, booléens, texte, tableaux fixes).
    pub fn is_value_kind(&self) -> bool {
        match self {
            TypeTag::Int | TypeTag::Float | TypeTag::Bool | TypeTag::Str => true,
            TypeTag::Array(elem, _) => elem.is_value_kind(),
            _ => false,
        }
    }

    // Constructeurs de confort pour les étiquettes composées.

    pub fn ptr_to(elem: TypeTag) -> TypeTag {
        TypeTag::Ptr(Box::new(elem))
    }

    pub fn seq_of(elem: TypeTag) -> TypeTag {
        TypeTag::Seq(Box::new(elem))
    }

    pub fn map_of(key: TypeTag, value: TypeTag) -> TypeTag {
        TypeTag::Map(Box::new(key), Box::new(value))
    }

    pub fn chan_of(elem: TypeTag) -> TypeTag {
        TypeTag::Chan(Box::new(elem))
    }

    pub fn record(name: &str) -> TypeTag {
        TypeTag::Record(name.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TypeTag::ptr_to(TypeTag::Int).to_string(), "*Int");
        assert_eq!(TypeTag::seq_of(TypeTag::Str).to_string(), "[]Str");
        assert_eq!(
            TypeTag::map_of(TypeTag::Str, TypeTag::Int).to_string(),
            "map[Str]Int"
        );
        assert_eq!(TypeTag::chan_of(TypeTag::Bool).to_string(), "chan Bool");
        assert_eq!(TypeTag::record("Person").to_string(), "Person");
        assert_eq!(
            TypeTag::Array(Box::new(TypeTag::Int), 3).to_string(),
            "[3]Int"
        );
    }

    #[test]
    fn test_accepts_identity() {
        assert!(TypeTag::Int.accepts(&TypeTag::Int));
        assert!(TypeTag::ptr_to(TypeTag::Int).accepts(&TypeTag::ptr_to(TypeTag::Int)));
        assert!(TypeTag::record("Person").accepts(&TypeTag::record("Person")));
    }

    #[test]
    fn test_accepts_refuse_elargissement() {
        // Pas d'élargissement numérique : hors périmètre
        assert!(!TypeTag::Float.accepts(&TypeTag::Int));
        assert!(!TypeTag::Int.accepts(&TypeTag::Float));
        // Nominal pour les records
        assert!(!TypeTag::record("Person").accepts(&TypeTag::record("User")));
        // Les conteneurs comparent leurs éléments
        assert!(!TypeTag::seq_of(TypeTag::Int).accepts(&TypeTag::seq_of(TypeTag::Str)));
    }

    #[test]
    fn test_is_value_kind() {
        assert!(TypeTag::Int.is_value_kind());
        assert!(TypeTag::Str.is_value_kind());
        assert!(TypeTag::Array(Box::new(TypeTag::Float), 4).is_value_kind());
        // Un tableau de pointeurs n'est PAS un genre valeur
        assert!(!TypeTag::Array(Box::new(TypeTag::ptr_to(TypeTag::Int)), 2).is_value_kind());
        assert!(!TypeTag::ptr_to(TypeTag::Int).is_value_kind());
        assert!(!TypeTag::seq_of(TypeTag::Int).is_value_kind());
        assert!(!TypeTag::record("Person").is_value_kind());
        assert!(!TypeTag::chan_of(TypeTag::Int).is_value_kind());
    }
}
