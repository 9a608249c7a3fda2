// =============================================================================
// COPISTE — Point d'entrée : démonstration du moteur de copie
// =============================================================================
//
// Ce main.rs montre un exemple complet :
//   1. Construire un record source (genres valeur + conteneurs + canal)
//   2. Copie SHALLOW : le stockage est partagé, une mutation se voit partout
//   3. Copie DEEP : tout est reconstruit, la source peut bouger sans effet
//   4. Tolérance de forme : copier vers un type voisin mais non identique
//
// =============================================================================

use copiste::core::copy::{deep_copy, shallow_copy};
use copiste::core::record::Record;
use copiste::core::typetag::TypeTag;
use copiste::core::value::{Chan, Key, Map, Ptr, Seq, Value};

/// Un Person aux champs vides : la destination type des copies
fn empty_person() -> Record {
    let mut r = Record::new("Person");
    r.add_field("name", TypeTag::Str, Value::str(""))
        .add_field("age", TypeTag::Int, Value::Int(0))
        .add_field(
            "best_score",
            TypeTag::ptr_to(TypeTag::Int),
            Value::Ptr(Ptr::nil(TypeTag::Int)),
        )
        .add_field(
            "tags",
            TypeTag::seq_of(TypeTag::Str),
            Value::Seq(Seq::nil(TypeTag::Str)),
        )
        .add_field(
            "counters",
            TypeTag::map_of(TypeTag::Str, TypeTag::Int),
            Value::Map(Map::nil(TypeTag::Str, TypeTag::Int)),
        )
        .add_field(
            "inbox",
            TypeTag::chan_of(TypeTag::Str),
            Value::Chan(Chan::new(TypeTag::Str, 8)),
        );
    r
}

/// Relit le record derrière un pointeur destination
fn unbox(value: &Value) -> Record {
    match value {
        Value::Ptr(p) => match p.get() {
            Some(Value::Record(r)) => r,
            _ => unreachable!("la destination est toujours un record"),
        },
        _ => unreachable!("la destination est toujours un pointeur"),
    }
}

fn main() {
    println!("╔══════════════════════════════════════════════════╗");
    println!("║      COPISTE — Moteur de copie de records        ║");
    println!("║      Duplication shallow & deep                  ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 1 : Construire le record source
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 1 : Le record source ═══\n");

    let inbox = Chan::new(TypeTag::Str, 8);
    inbox.send(Value::str("message en attente"));

    let mut person = Record::new("Person");
    person
        .add_field("name", TypeTag::Str, Value::str("Alice"))
        .add_field("age", TypeTag::Int, Value::Int(30))
        .add_field(
            "best_score",
            TypeTag::ptr_to(TypeTag::Int),
            Value::Ptr(Ptr::to(TypeTag::Int, Value::Int(7))),
        )
        .add_field(
            "tags",
            TypeTag::seq_of(TypeTag::Str),
            Value::Seq(Seq::from(
                TypeTag::Str,
                vec![Value::str("admin"), Value::str("staff")],
            )),
        )
        .add_field(
            "counters",
            TypeTag::map_of(TypeTag::Str, TypeTag::Int),
            Value::Map(Map::from(
                TypeTag::Str,
                TypeTag::Int,
                vec![(Key::str("logins"), Value::Int(12))],
            )),
        )
        .add_field("inbox", TypeTag::chan_of(TypeTag::Str), Value::Chan(inbox));

    println!("{}\n", person);

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 2 : Copie SHALLOW — le stockage est partagé
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 2 : Copie SHALLOW ═══\n");

    let shallow_dst = Value::Ptr(Ptr::to_record(empty_person()));
    match shallow_copy(&shallow_dst, &Value::Record(person.clone())) {
        Ok(()) => println!("✓ Copie shallow réussie"),
        Err(e) => println!("✗ {}", e),
    }
    println!("{}\n", unbox(&shallow_dst));

    // Muter la séquence SOURCE : la destination la voit aussi
    if let Some(Value::Seq(tags)) = person.get("tags") {
        tags.push(Value::str("invité"));
    }
    println!("Après ajout du tag \"invité\" côté source :");
    println!("{}\n", unbox(&shallow_dst));

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 3 : Copie DEEP — plus aucun partage
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 3 : Copie DEEP ═══\n");

    let deep_dst = Value::Ptr(Ptr::to_record(empty_person()));
    match deep_copy(&deep_dst, &Value::Record(person.clone())) {
        Ok(()) => println!("✓ Copie deep réussie"),
        Err(e) => println!("✗ {}", e),
    }

    // Muter la source : la destination deep ne bouge plus
    if let Some(Value::Ptr(score)) = person.get("best_score") {
        score.set(Value::Int(999));
    }
    if let Some(Value::Map(counters)) = person.get("counters") {
        counters.insert(Key::str("logins"), Value::Int(999));
    }
    println!("Après mutation de la source (best_score = 999, logins = 999) :");
    println!("{}", unbox(&deep_dst));
    println!("(le canal, lui, repart neuf et vide : contenu non transféré)\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 4 : Tolérance de forme — copier vers un type voisin
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 4 : Copie vers un type voisin ═══\n");

    let mut badge = Record::new("Badge");
    badge
        .add_field("name", TypeTag::Str, Value::str("?"))
        .add_field("building", TypeTag::Str, Value::str("B42"))
        .add_private_field("serial", TypeTag::Int, Value::Int(1337));

    let badge_dst = Value::Ptr(Ptr::to_record(badge));
    match deep_copy(&badge_dst, &Value::Record(person)) {
        Ok(()) => println!("✓ Seul le sous-ensemble compatible est copié"),
        Err(e) => println!("✗ {}", e),
    }
    println!("{}\n", unbox(&badge_dst));

    println!("═══════════════════════════════════════════════════");
    println!("Copie terminée : shallow partage, deep isole,");
    println!("les désaccords de forme sont sautés en silence.");
    println!("═══════════════════════════════════════════════════");
}
