// =============================================================================
// CORE — Module principal du moteur de copie
// =============================================================================
//
// Ce module regroupe toute la logique pure : pas d'E/S, pas d'état global —
// uniquement des valeurs, des records et deux modes de duplication.
//
// Architecture :
//   typetag    → les étiquettes de type (Int, Str, Ptr, Map, Seq, Chan...)
//   value      → la valeur vivante (variante étiquetée) et ses conteneurs
//   record     → l'agrégat de champs nommés (= la "struct" dynamique)
//   structural → le trait d'introspection (nom, type, slot affectable)
//   copy       → le moteur : validation, correspondance par nom, récursion
//
// Ordre de lecture conseillé : typetag → value → record → structural → copy.
//
// =============================================================================

pub mod typetag;
pub mod value;
pub mod record;
pub mod structural;
pub mod copy;
