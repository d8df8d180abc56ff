//! Load a lambda-calculus definitions file, evaluate any query expressions
//! against it, and print the results to standard output.
//!
//! Example usage:
//!
//!     cargo run -- \
//!         --src-filepath definitions/church.lam \
//!         --query "+1 4"

use clap::Parser;
use lambda_workbench::end_to_end::{run_workbench, WorkbenchConfig};

fn main() {
    let workbench_config = WorkbenchConfig::parse();

    let workbench_result = run_workbench(&workbench_config);

    match workbench_result {
        Ok(output) => {
            println!("{}", output);
        }

        Err(run_error) => {
            println!("{}", run_error);
        }
    }
}
