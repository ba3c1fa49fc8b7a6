use std::env;
use std::process;

use domain::validate::Validator;
use domain::ValidationResult;

fn print_usage() {
    eprintln!(
        "{}\n\nUsage:\n  domain check <text...>\n  domain rules\n\nNotes:\n  - `check` joins its arguments with spaces and runs them through the form validator.",
        domain::about()
    );
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1); // skip program name

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };

    let validator = Validator::new().map_err(|e| format!("validator init failed: {}", e))?;

    match cmd.as_str() {
        "check" => {
            let text = args.collect::<Vec<_>>().join(" ");
            match validator.validate(&text) {
                ValidationResult::Accepted(msg) => {
                    println!("accepted: {}", msg);
                    Ok(())
                }
                ValidationResult::Rejected(r) => Err(format!("rejected: {}", r)),
            }
        }
        "rules" => {
            for r in domain::validate::BLOCKLIST {
                println!("{:<20} {:<4} {}", r.name, r.category.as_str(), r.pattern);
            }
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(msg) = run() {
        eprintln!("{}", msg);
        process::exit(1);
    }
}
