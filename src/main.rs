use std::{env, io, process};

use lbpl::Lbpl;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: lbpl <script>");
        process::exit(64);
    }

    let mut stdout = io::stdout();
    let mut lbpl = Lbpl::new(&mut stdout);
    lbpl.run_file(args[1].clone());
}
