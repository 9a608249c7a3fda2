// =============================================================================
// COPISTE — Moteur de copie de records (shallow / deep)
// =============================================================================
//
// Copiste duplique les champs d'un record typé à l'exécution vers un autre
// record de type compatible champ à champ, selon deux modes :
//
//   Shallow → les valeurs sont réutilisées telles quelles (les conteneurs
//             partagent leur stockage : une mutation est visible des deux côtés)
//   Deep    → chaque conteneur mutable atteignable (pointeur, map, séquence,
//             record imbriqué) est reconstruit : plus aucun partage mémoire
//
// Architecture :
//   core/     → Le moteur de copie pur (aucune E/S, aucun état global)
//
// Concepts fondamentaux :
//   TypeTag    = l'étiquette de type déclarée d'un champ
//   Value      = la valeur vivante (variante étiquetée, dispatch unique)
//   Record     = un agrégat de champs nommés, typés, inscriptibles ou non
//   Structural = la capacité d'introspection (nom, type, slot affectable)
//   copy       = le moteur (validation, correspondance par nom, récursion)
//
// =============================================================================

pub mod core;
