//! Loading a memory image from a real file on disk, the same path
//! `main.rs` takes for `--image <path>` (every other test drives
//! `Simulator::from_image` over an in-memory `Cursor`).

mod common;

use std::fs::File;
use std::io::{BufReader, Write};

use common::*;
use rv32i_pipesim::{Config, Simulator, Termination};

#[test]
fn simulator_runs_an_image_loaded_from_a_file() {
    let image = straight_line_image(&[addi(A0, ZERO, 9)]);
    let mut file = tempfile::NamedTempFile::new().expect("create temp image file");
    file.write_all(image.as_bytes()).expect("write temp image file");

    let reader = BufReader::new(File::open(file.path()).expect("reopen temp image file"));
    let mut sim = Simulator::from_image(reader, Config::default()).unwrap();
    assert_eq!(sim.run().unwrap(), Termination::Retired(9));
}
