//! WebAssembly interface for building pRNN adjacency matrices in the browser.
//!
//! Matrices cross the boundary as flat row-major `Uint8Array`s of nine cells.

use wasm_bindgen::prelude::*;

use crate::{build_adjacency, create_adjacency_matrix, ArchitectureFlags, AdjacencyMatrix};

fn to_js_error(err: crate::PrnnError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten(matrix: &AdjacencyMatrix) -> Vec<u8> {
    matrix.rows().iter().flatten().copied().collect()
}

/// Build the adjacency matrix for a 7-element configuration vector.
///
/// # Example (JavaScript)
/// ```javascript
/// const w = buildAdjacency(new Uint8Array([0, 1, 0, 0, 0, 0, 0]));
/// // w = [0,1,0, 0,1,1, 0,0,0]
/// ```
#[wasm_bindgen(js_name = buildAdjacency)]
pub fn build_adjacency_js(config: &[u8]) -> Result<Vec<u8>, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let matrix = create_adjacency_matrix(config).map_err(to_js_error)?;
    Ok(flatten(&matrix))
}

/// Build the adjacency matrix for a 7-bit architecture code (0-127).
#[wasm_bindgen(js_name = adjacencyFromCode)]
pub fn adjacency_from_code_js(code: u8) -> Result<Vec<u8>, JsValue> {
    let flags = ArchitectureFlags::from_code(code).map_err(to_js_error)?;
    Ok(flatten(&build_adjacency(&flags)))
}

/// Configuration vectors of all 128 architectures as a JS array of strings.
#[wasm_bindgen(js_name = allArchitectures)]
pub fn all_architectures_js() -> js_sys::Array {
    crate::catalog::all_architectures()
        .map(|flags| JsValue::from_str(&flags.to_string()))
        .collect()
}
