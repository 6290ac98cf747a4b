// ============================================================================
// Module : ui
// ============================================================================
// Gère tout l'affichage console (prompts, messages, rendu des chandelles)
// ============================================================================

pub mod console; // Prompts, séparateurs et messages
pub mod report;  // Rendu des chandelles (résumé et détaillé)

// Re-exports pour simplifier les imports
pub use report::{detailed_block, summary_line};
