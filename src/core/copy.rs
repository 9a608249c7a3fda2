// =============================================================================
// COPY — Le moteur : validation, correspondance par nom, récursion
// =============================================================================
//
// Deux pièces, de la feuille vers la racine :
//
//   copy_value  → la primitive récursive. Reçoit un slot destination et une
//                 valeur source PRÉ-VALIDÉS et compatibles : elle ne peut
//                 pas échouer. Un seul dispatch par valeur, sur la variante.
//
//   copy        → le point d'entrée. Valide les deux arguments (et seulement
//                 eux : aucune erreur n'est possible passé ce stade), bâtit
//                 la correspondance nom → indice côté source, puis délègue
//                 champ par champ à copy_value.
//
// ┌─────────────────────────────────────────────────────────────────────┐
// │  Shallow → un clone aliasant : les Rc sous-jacents sont partagés,   │
// │            muter d'un côté se voit de l'autre                       │
// │  Deep    → reconstruction : pointeurs, maps et séquences repartent  │
// │            dans un stockage neuf, récursivement ; les canaux font   │
// │            exception (canal NEUF ET VIDE, contenu non transféré)    │
// └─────────────────────────────────────────────────────────────────────┘
//
// Les désaccords de FORME entre source et destination (nom absent d'un
// côté, type incompatible, champ non inscriptible) ne sont JAMAIS des
// erreurs : ils sont sautés en silence. C'est ce qui permet de copier
// entre deux types voisins mais non identiques.
//
// LIMITE ASSUMÉE : le graphe de valeurs doit être fini et acyclique.
// Sur un record auto-référent, la copie deep ne termine pas — aucune
// détection de cycle n'est faite, comme dans le moteur d'origine.
//
// =============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

use super::record::Record;
use super::structural::Structural;
use super::value::{Chan, Map, Ptr, Seq, Value};

/// Le mode de duplication, passé explicitement de la racine aux feuilles —
/// jamais d'état ambiant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Les valeurs sont réutilisées telles quelles (stockage partagé)
    Shallow,
    /// Tout conteneur mutable atteignable est reconstruit
    Deep,
}

/// Les quatre refus possibles, tous détectés AVANT de toucher au moindre
/// champ : passé la validation, l'opération ne peut plus échouer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// Aucune valeur fournie (Null au sommet), côté destination ou source
    #[error("argument manquant : destination ou source absente")]
    MissingArgument,
    /// La destination n'est pas un pointeur non nul vers un record
    #[error("la destination n'est pas un pointeur inscriptible vers un record")]
    InvalidDestination,
    /// La source est un pointeur nul là où un record était attendu
    #[error("la source est un pointeur nil")]
    NilSource,
    /// La source n'est ni un record ni un pointeur vers un record
    #[error("la source n'est pas un record")]
    InvalidSource,
}

/// Copie superficielle : équivalent de `copy(dst, src, CopyMode::Shallow)`.
pub fn shallow_copy(destination: &Value, source: &Value) -> Result<(), CopyError> {
    copy(destination, source, CopyMode::Shallow)
}

/// Copie profonde : équivalent de `copy(dst, src, CopyMode::Deep)`.
pub fn deep_copy(destination: &Value, source: &Value) -> Result<(), CopyError> {
    copy(destination, source, CopyMode::Deep)
}

/// Copie les champs du record source vers le record destination.
///
/// La destination doit être un pointeur non nul vers un record ; la source
/// un record, ou un pointeur non nul vers un record (déréférencé d'un seul
/// niveau — pas de chasse aux pointeurs). La source n'est jamais mutée,
/// sous aucun mode.
///
/// ALGORITHME :
///   0. Validation des deux arguments (les quatre CopyError viennent d'ici)
///   1. Correspondance nom → indice sur les champs source (un seul passage)
///   2. Pour chaque champ destination, en ordre de déclaration : si un champ
///      source de même nom existe, que la destination est inscriptible et
///      le type source assignable, déléguer à copy_value — sinon, sauter
///      en silence et laisser la valeur destination en place
pub fn copy(destination: &Value, source: &Value, mode: CopyMode) -> Result<(), CopyError> {
    // Étape 0 — validation, aucune mutation avant ce point
    if matches!(destination, Value::Null) || matches!(source, Value::Null) {
        return Err(CopyError::MissingArgument);
    }

    // La destination : un pointeur non nul, dont la cible est un record
    let dst_cell = match destination {
        Value::Ptr(p) => match &p.target {
            Some(cell) => Rc::clone(cell),
            None => return Err(CopyError::InvalidDestination),
        },
        _ => return Err(CopyError::InvalidDestination),
    };
    if !matches!(&*dst_cell.borrow(), Value::Record(_)) {
        return Err(CopyError::InvalidDestination);
    }

    // La source : un record, ou un pointeur vers un record (un seul niveau).
    // On clone un instantané superficiel : la source reste intacte, et la
    // copie d'un record sur lui-même reste sûre.
    let source_record: Record = match source {
        Value::Record(r) => r.clone(),
        Value::Ptr(p) => match &p.target {
            Some(cell) => match &*cell.borrow() {
                Value::Record(r) => r.clone(),
                _ => return Err(CopyError::InvalidSource),
            },
            None => return Err(CopyError::NilSource),
        },
        _ => return Err(CopyError::InvalidSource),
    };

    // Deux temps. La boucle champ à champ travaille sur un instantané du
    // record destination, SANS détenir d'emprunt sur la cellule : un champ
    // source peut pointer vers cette cellule même, et la récursion deep
    // doit pouvoir la lire. L'affectation ne vient qu'une fois tous les
    // champs calculés.
    let mut dst_record = match &*dst_cell.borrow() {
        Value::Record(r) => r.clone(),
        // La cible a été vérifiée ci-dessus
        _ => return Err(CopyError::InvalidDestination),
    };

    trace!(
        mode = ?mode,
        destination = %dst_record.type_name,
        source = %source_record.type_name,
        "copie de record"
    );

    copy_fields(&mut dst_record, &source_record, mode);
    *dst_cell.borrow_mut() = Value::Record(dst_record);
    Ok(())
}

/// La boucle champ à champ entre deux formes structurelles, utilisable
/// directement avec toute implémentation de Structural (une struct native
/// par exemple) : la validation d'arguments de `copy` ne s'applique qu'à
/// la forme dynamique Value.
pub fn copy_fields(destination: &mut dyn Structural, source: &dyn Structural, mode: CopyMode) {
    // Correspondance nom → indice côté source, en un seul passage
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for i in 0..source.field_count() {
        by_name.insert(source.descriptor(i).name.to_string(), i);
    }

    let mut copied = 0usize;
    let mut skipped = 0usize;

    for d in 0..destination.field_count() {
        let (source_index, writable, declared) = {
            let desc = destination.descriptor(d);
            (
                by_name.get(desc.name).copied(),
                desc.writable,
                desc.declared.clone(),
            )
        };

        // Nom absent côté source : on saute
        let s = match source_index {
            Some(s) => s,
            None => {
                skipped += 1;
                continue;
            }
        };
        // Champ destination privé : on saute
        if !writable {
            skipped += 1;
            continue;
        }
        // Type constaté non assignable au type déclaré : on saute
        let source_value = source.value(s);
        match source_value.type_tag() {
            Some(tag) if declared.accepts(&tag) => {}
            _ => {
                skipped += 1;
                continue;
            }
        }

        let mut slot = destination.value(d);
        copy_value(&mut slot, &source_value, mode);
        destination.set_value(d, slot);
        copied += 1;
    }

    trace!(copied, skipped, "boucle champ à champ terminée");
}

/// La primitive récursive : reconstruit (ou aliase) `src` dans le slot
/// `dst`, selon le mode. Infaillible : elle n'est appelée que sur des
/// slots pré-validés et compatibles.
pub fn copy_value(dst: &mut Value, src: &Value, mode: CopyMode) {
    if mode == CopyMode::Shallow {
        // Le clone partage les Rc : pointeurs, séquences, maps et canaux
        // restent aliasés. Les genres valeur sont dupliqués — aucun alias
        // n'est possible sur eux de toute façon.
        *dst = src.clone();
        return;
    }

    *dst = match src {
        // Pointeur : le nil reste nil (typé) ; sinon cible neuve + récursion
        Value::Ptr(p) => match &p.target {
            None => Value::Ptr(Ptr::nil(p.elem.clone())),
            Some(cell) => {
                let mut inner = Value::Null;
                copy_value(&mut inner, &cell.borrow(), CopyMode::Deep);
                Value::Ptr(Ptr::to(p.elem.clone(), inner))
            }
        },

        // Map : le nil reste nil ; sinon map neuve, en recopiant CLÉ et
        // VALEUR dans un stockage neuf avant chaque insertion
        Value::Map(m) => match &m.entries {
            None => Value::Map(Map::nil(m.key.clone(), m.value.clone())),
            Some(cell) => {
                let mut fresh = HashMap::new();
                for (key, value) in cell.borrow().iter() {
                    // Les clés sont des genres valeur : le clone réalloue
                    // (une clé Str repart dans une chaîne neuve)
                    let new_key = key.clone();
                    let mut new_value = Value::Null;
                    copy_value(&mut new_value, value, CopyMode::Deep);
                    fresh.insert(new_key, new_value);
                }
                Value::Map(Map {
                    key: m.key.clone(),
                    value: m.value.clone(),
                    entries: Some(Rc::new(RefCell::new(fresh))),
                })
            }
        },

        // Séquence : le nil reste nil ; sinon stockage neuf préservant
        // longueur ET capacité, récursion élément par élément
        Value::Seq(s) => match &s.items {
            None => Value::Seq(Seq::nil(s.elem.clone())),
            Some(cell) => {
                let items = cell.borrow();
                let mut fresh = Vec::with_capacity(items.capacity());
                for item in items.iter() {
                    let mut element = Value::Null;
                    copy_value(&mut element, item, CopyMode::Deep);
                    fresh.push(element);
                }
                Value::Seq(Seq {
                    elem: s.elem.clone(),
                    items: Some(Rc::new(RefCell::new(fresh))),
                })
            }
        },

        // Record incorporé : récursion POSITIONNELLE, champ par champ —
        // même type des deux côtés, pas de correspondance par nom
        Value::Record(r) => {
            let mut fresh = r.clone();
            for (dst_field, src_field) in fresh.fields.iter_mut().zip(r.fields.iter()) {
                copy_value(&mut dst_field.value, &src_field.value, CopyMode::Deep);
            }
            Value::Record(fresh)
        }

        // Canal : poignée non possédante — on fabrique un canal NEUF ET
        // VIDE de même type et capacité. Le contenu en attente n'est pas
        // transféré : exemption documentée de l'invariant de non-partage.
        Value::Chan(c) => Value::Chan(Chan::new(c.elem.clone(), c.capacity)),

        // Genres valeur (et Null) : aucun stockage partagé possible
        other => other.clone(),
    };
}
