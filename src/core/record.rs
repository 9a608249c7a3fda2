// =============================================================================
// RECORD — L'agrégat de champs nommés (la "struct" dynamique)
// =============================================================================
//
// Un Record est une suite ORDONNÉE de champs, chacun portant :
//   - un nom (la clé de correspondance entre deux records)
//   - un type déclaré (TypeTag)
//   - un drapeau d'inscriptibilité (un champ privé n'est jamais copié)
//   - une valeur vivante (Value)
//
// ANALOGIE : Record = le couple (reflect.Type, reflect.Value) d'une struct.
// L'identité de type est NOMINALE : deux records de même type_name sont du
// même type ; deux records de noms différents peuvent néanmoins être copiés
// l'un vers l'autre champ à champ, tant que des noms coïncident — c'est
// toute la tolérance du moteur.
//
// Le constructeur suit le style chaîné :
//   let mut p = Record::new("Person");
//   p.add_field("name", TypeTag::Str, Value::str("Alice"))
//    .add_field("age", TypeTag::Int, Value::Int(30))
//    .add_private_field("secret", TypeTag::Str, Value::str("caché"));
//
// =============================================================================

use std::fmt;

use super::typetag::TypeTag;
use super::value::Value;

/// Un champ nommé : le descripteur et la valeur réunis.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Nom du champ (la clé de correspondance)
    pub name: String,
    /// Type déclaré du champ
    pub declared: TypeTag,
    /// Un champ non inscriptible est ignoré par toute copie, en silence
    pub writable: bool,
    /// La valeur vivante
    pub value: Value,
}

/// Un record : des champs nommés, en ordre de déclaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Nom du type (l'identité nominale)
    pub type_name: String,
    /// Les champs, en ordre de déclaration
    pub fields: Vec<Field>,
}

impl Record {
    /// Crée un record vide d'un type donné
    pub fn new(type_name: &str) -> Self {
        Record {
            type_name: type_name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Ajoute un champ inscriptible (l'équivalent d'un champ exporté)
    pub fn add_field(&mut self, name: &str, declared: TypeTag, value: Value) -> &mut Self {
        self.fields.push(Field {
            name: name.to_string(),
            declared,
            writable: true,
            value,
        });
        self
    }

    /// Ajoute un champ NON inscriptible (l'équivalent d'un champ privé).
    /// Il restera intact sous toute copie, quel que soit le mode.
    pub fn add_private_field(&mut self, name: &str, declared: TypeTag, value: Value) -> &mut Self {
        self.fields.push(Field {
            name: name.to_string(),
            declared,
            writable: false,
            value,
        });
        self
    }

    /// Cherche un champ par nom
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Cherche un champ par nom (version mutable)
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Lit la valeur d'un champ par nom
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|f| &f.value)
    }

    /// Écrit la valeur d'un champ par nom. Retourne false si le champ
    /// n'existe pas. N'applique PAS le drapeau d'inscriptibilité : c'est
    /// le moteur de copie qui filtre, pas le record lui-même.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    /// Nombre de champs
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", field.name, field.value)?;
        }
        write!(f, " }}")
    }
}
