use wasm_bindgen::prelude::*;

mod page;
use page::CpuExplorer;

wisp_web::export_page!(CpuExplorer, "cpu-explorer");
