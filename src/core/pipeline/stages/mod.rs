//! One file per pipeline stage, each contributing an `impl Controller`
//! block. Split out from `engine.rs` so each stage's datapath reads on
//! its own, the way the reference splits `InstFetch`/`InstDecode`/
//! `InstExecute`/`InstMemAccess`/`InstWriteBack` into one function apiece.

mod decode;
mod execute;
mod fetch;
mod memory;
mod writeback;
