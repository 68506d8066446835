// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (inspecting the corpus or fetching batches).
//
// Rules for this layer:
//   - No tensor math or array code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 5)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Corpus statistics: split sizes, vocabulary, feature shapes
pub mod inspect_use_case;

// Fetch and collate a batch of examples for inspection
pub mod sample_use_case;
