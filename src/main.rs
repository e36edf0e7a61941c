use jpmesh_rs::{JpMeshError, MeshCell};
use log::{debug, error};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let codes: Vec<String> = std::env::args().skip(1).collect();
    if codes.is_empty() {
        eprintln!("usage: jpmesh <mesh-code>...");
        return ExitCode::from(2);
    }

    println!("code,latitude,longitude");

    let mut failed = false;
    for code in &codes {
        match locate(code) {
            Ok(cell) => {
                debug!("{} spans {:?}", cell, cell.bounds);
                println!("{},{},{}", cell.code, cell.lat(), cell.lon());
            }
            Err(e) => {
                error!("{}", e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn locate(code: &str) -> Result<MeshCell, JpMeshError> {
    MeshCell::from_code(code.trim())
}
