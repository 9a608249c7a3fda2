// =============================================================================
// VALUE — La valeur vivante : une variante étiquetée, dispatchée une fois
// =============================================================================
//
// Toute donnée manipulée par le moteur est une Value. C'est l'équivalent de
// reflect.Value : une valeur dont le genre n'est connu qu'à l'exécution.
//
// Le point crucial est le MODÈLE DE PARTAGE :
//   - Les genres valeur (Int, Float, Bool, Str, Array) vivent en ligne.
//     Les cloner duplique leur contenu — aucun alias possible.
//   - Les genres conteneur (Ptr, Seq, Map, Chan) détiennent leur stockage
//     derrière un Rc<RefCell<...>>. Les cloner partage ce stockage : c'est
//     exactement la sémantique de la copie SHALLOW. La copie DEEP, elle,
//     reconstruit un stockage neuf (voir le module copy).
//
// EXEMPLE :
//   let s = Seq::from(TypeTag::Int, vec![Value::Int(1)]);
//   let alias = s.clone();          // même stockage
//   alias.push(Value::Int(2));
//   assert_eq!(s.len(), 2);         // visible des deux côtés
//
// Ptr, Seq et Map ont un état NIL (typé) : le pointeur nul, le slice nil,
// la map nil. Un nil reste nil sous les deux modes de copie — on ne
// "copie en profondeur" jamais un nil vers un conteneur vide alloué.
//
// =============================================================================

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use super::record::Record;
use super::typetag::TypeTag;

/// Une clé de map : la restriction hashable des genres valeur.
///
/// Les clés se dupliquent par valeur (une clé Str réalloue sa chaîne) :
/// après une copie deep, aucune clé ne partage de stockage avec la source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Key {
    /// L'étiquette de type de cette clé
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Key::Int(_) => TypeTag::Int,
            Key::Bool(_) => TypeTag::Bool,
            Key::Str(_) => TypeTag::Str,
        }
    }

    pub fn str(s: &str) -> Key {
        Key::Str(s.to_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Un tableau de taille fixe, restreint aux genres valeur.
/// Pas d'indirection : il se copie par valeur sous les deux modes.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    /// Type des éléments (un genre valeur)
    pub elem: TypeTag,
    /// Les éléments, en ligne
    pub items: Vec<Value>,
}

impl Array {
    pub fn new(elem: TypeTag, items: Vec<Value>) -> Self {
        Array { elem, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Un pointeur nullable et typé.
///
/// Cloner un Ptr partage sa cible (c'est un alias). `target == None`
/// est le pointeur nul typé : on connaît le type pointé, pas la cible.
#[derive(Debug, Clone)]
pub struct Ptr {
    /// Type pointé
    pub elem: TypeTag,
    /// La cible, partagée entre tous les alias de ce pointeur
    pub target: Option<Rc<RefCell<Value>>>,
}

impl Ptr {
    /// Le pointeur nul d'un type pointé donné
    pub fn nil(elem: TypeTag) -> Self {
        Ptr { elem, target: None }
    }

    /// Un pointeur vers une cible fraîchement allouée
    pub fn to(elem: TypeTag, value: Value) -> Self {
        Ptr {
            elem,
            target: Some(Rc::new(RefCell::new(value))),
        }
    }

    /// Un pointeur vers un record (l'étiquette pointée se déduit du record)
    pub fn to_record(record: Record) -> Self {
        let elem = TypeTag::Record(record.type_name.clone());
        Ptr::to(elem, Value::Record(record))
    }

    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// Lit la cible (clone superficiel). None si le pointeur est nul.
    pub fn get(&self) -> Option<Value> {
        self.target.as_ref().map(|cell| cell.borrow().clone())
    }

    /// Écrit à travers le pointeur. Sans effet si le pointeur est nul.
    pub fn set(&self, value: Value) {
        if let Some(cell) = &self.target {
            *cell.borrow_mut() = value;
        }
    }

    /// Les deux pointeurs visent-ils la MÊME cible ? (identité d'adresse)
    pub fn shares_target(&self, other: &Ptr) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// L'égalité d'un Ptr compare les CIBLES (et le type pointé), pas l'adresse :
// deux pointeurs distincts vers deux 7 distincts sont égaux.
impl PartialEq for Ptr {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem
            && match (&self.target, &other.target) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
                _ => false,
            }
    }
}

/// Une séquence ordonnée redimensionnable, au stockage partagé.
///
/// `items == None` est la séquence nil (distincte de la séquence vide).
#[derive(Debug, Clone)]
pub struct Seq {
    /// Type des éléments
    pub elem: TypeTag,
    /// Le stockage sous-jacent, partagé entre tous les alias
    pub items: Option<Rc<RefCell<Vec<Value>>>>,
}

impl Seq {
    /// La séquence nil d'un type d'élément donné
    pub fn nil(elem: TypeTag) -> Self {
        Seq { elem, items: None }
    }

    /// Une séquence au stockage fraîchement alloué
    pub fn from(elem: TypeTag, items: Vec<Value>) -> Self {
        Seq {
            elem,
            items: Some(Rc::new(RefCell::new(items))),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.items.is_none()
    }

    /// Longueur (0 pour une séquence nil)
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |cell| cell.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacité du stockage sous-jacent (0 pour une séquence nil)
    pub fn capacity(&self) -> usize {
        self.items
            .as_ref()
            .map_or(0, |cell| cell.borrow().capacity())
    }

    /// Lit l'élément d'indice i (clone superficiel)
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items
            .as_ref()
            .and_then(|cell| cell.borrow().get(index).cloned())
    }

    /// Écrit l'élément d'indice i. Sans effet si nil ou hors bornes.
    pub fn set(&self, index: usize, value: Value) {
        if let Some(cell) = &self.items {
            let mut items = cell.borrow_mut();
            if index < items.len() {
                items[index] = value;
            }
        }
    }

    /// Ajoute un élément en fin de séquence. Sans effet si nil.
    pub fn push(&self, value: Value) {
        if let Some(cell) = &self.items {
            cell.borrow_mut().push(value);
        }
    }

    /// Les deux séquences partagent-elles le MÊME stockage ?
    pub fn shares_storage(&self, other: &Seq) -> bool {
        match (&self.items, &other.items) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Égalité de contenu (le nil n'est égal qu'au nil)
impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem
            && match (&self.items, &other.items) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
                _ => false,
            }
    }
}

/// Un conteneur associatif clé → valeur, au stockage partagé.
///
/// `entries == None` est la map nil (distincte de la map vide).
#[derive(Debug, Clone)]
pub struct Map {
    /// Type des clés
    pub key: TypeTag,
    /// Type des valeurs
    pub value: TypeTag,
    /// Le stockage sous-jacent, partagé entre tous les alias
    pub entries: Option<Rc<RefCell<HashMap<Key, Value>>>>,
}

impl Map {
    /// La map nil d'un couple de types donné
    pub fn nil(key: TypeTag, value: TypeTag) -> Self {
        Map {
            key,
            value,
            entries: None,
        }
    }

    /// Une map au stockage fraîchement alloué
    pub fn from(key: TypeTag, value: TypeTag, pairs: Vec<(Key, Value)>) -> Self {
        Map {
            key,
            value,
            entries: Some(Rc::new(RefCell::new(pairs.into_iter().collect()))),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Nombre d'entrées (0 pour une map nil)
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |cell| cell.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lit la valeur associée à une clé (clone superficiel)
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.entries
            .as_ref()
            .and_then(|cell| cell.borrow().get(key).cloned())
    }

    /// Insère ou remplace une entrée. Sans effet si la map est nil.
    pub fn insert(&self, key: Key, value: Value) {
        if let Some(cell) = &self.entries {
            cell.borrow_mut().insert(key, value);
        }
    }

    /// Les deux maps partagent-elles le MÊME stockage ?
    pub fn shares_storage(&self, other: &Map) -> bool {
        match (&self.entries, &other.entries) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Égalité de contenu (le nil n'est égal qu'au nil)
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && match (&self.entries, &other.entries) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
                _ => false,
            }
    }
}

/// Un canal de communication : une poignée NON POSSÉDANTE sur une file
/// bornée partagée.
///
/// Cloner un Chan clone la poignée, jamais la file : tous les alias
/// envoient et reçoivent sur la même file. La copie deep, elle, fabrique
/// un canal NEUF ET VIDE de même type d'élément et de même capacité —
/// le contenu en attente n'est volontairement pas transféré.
#[derive(Debug, Clone)]
pub struct Chan {
    /// Type des éléments transportés
    pub elem: TypeTag,
    /// Capacité de la file (0 = non bufferisé)
    pub capacity: usize,
    /// La file partagée entre toutes les poignées
    pub queue: Rc<RefCell<VecDeque<Value>>>,
}

impl Chan {
    /// Un canal neuf et vide
    pub fn new(elem: TypeTag, capacity: usize) -> Self {
        Chan {
            elem,
            capacity,
            queue: Rc::new(RefCell::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Dépose une valeur dans la file. Retourne false si la file est pleine
    /// (le moteur ne bloque jamais : pas de point de suspension).
    pub fn send(&self, value: Value) -> bool {
        let mut queue = self.queue.borrow_mut();
        if self.capacity > 0 && queue.len() >= self.capacity {
            return false;
        }
        queue.push_back(value);
        true
    }

    /// Retire la valeur en tête de file, s'il y en a une
    pub fn recv(&self) -> Option<Value> {
        self.queue.borrow_mut().pop_front()
    }

    /// Nombre de valeurs en attente dans la file
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Les deux poignées visent-elles la MÊME file ?
    pub fn shares_queue(&self, other: &Chan) -> bool {
        Rc::ptr_eq(&self.queue, &other.queue)
    }
}

// Deux canaux sont égaux s'ils sont la MÊME file (identité de poignée),
// comme en Go : le contenu ne participe pas à l'égalité.
impl PartialEq for Chan {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem
            && self.capacity == other.capacity
            && Rc::ptr_eq(&self.queue, &other.queue)
    }
}

/// La valeur vivante : une variante étiquetée, dispatchée une seule fois
/// par champ par le moteur de copie.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// L'absence non typée — "aucune valeur fournie" au sommet d'un appel
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Array(Array),
    Ptr(Ptr),
    Seq(Seq),
    Map(Map),
    /// Record incorporé directement (par valeur, pas derrière un pointeur)
    Record(Record),
    Chan(Chan),
}

impl Value {
    /// Le type constaté de cette valeur. None pour Null : l'absence
    /// n'a pas de type, elle n'est donc assignable à aucun champ.
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Null => None,
            Value::Int(_) => Some(TypeTag::Int),
            Value::Float(_) => Some(TypeTag::Float),
            Value::Bool(_) => Some(TypeTag::Bool),
            Value::Str(_) => Some(TypeTag::Str),
            Value::Array(a) => Some(TypeTag::Array(Box::new(a.elem.clone()), a.items.len())),
            Value::Ptr(p) => Some(TypeTag::Ptr(Box::new(p.elem.clone()))),
            Value::Seq(s) => Some(TypeTag::Seq(Box::new(s.elem.clone()))),
            Value::Map(m) => Some(TypeTag::Map(
                Box::new(m.key.clone()),
                Box::new(m.value.clone()),
            )),
            Value::Record(r) => Some(TypeTag::Record(r.type_name.clone())),
            Value::Chan(c) => Some(TypeTag::Chan(Box::new(c.elem.clone()))),
        }
    }

    /// Constructeur de confort pour les chaînes
    pub fn str(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "nil"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, item) in a.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Ptr(p) => match &p.target {
                None => write!(f, "nil"),
                Some(cell) => write!(f, "&{}", cell.borrow()),
            },
            Value::Seq(s) => match &s.items {
                None => write!(f, "nil"),
                Some(cell) => {
                    write!(f, "[")?;
                    for (i, item) in cell.borrow().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, "]")
                }
            },
            Value::Map(m) => match &m.entries {
                None => write!(f, "nil"),
                Some(cell) => {
                    write!(f, "{{")?;
                    for (i, (key, value)) in cell.borrow().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}: {}", key, value)?;
                    }
                    write!(f, "}}")
                }
            },
            Value::Record(r) => write!(f, "{}", r),
            Value::Chan(c) => write!(f, "chan {} (cap={}, file={})", c.elem, c.capacity, c.len()),
        }
    }
}
