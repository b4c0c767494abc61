use std::{env, fs::read_to_string, path::PathBuf, process::exit, time::Instant};

use vesperc::{display_error, lower::parse_module};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let file_contents = read_to_string(file_path).expect("Failed to read file!");

    match parse_module(&file_contents, Some(String::from(file_name))) {
        Ok(module) => {
            println!("Lowered in {:?}", start.elapsed());
            print!("{}", module);
        }
        Err(error) => {
            display_error(error, PathBuf::from(file_path));
            exit(1);
        }
    }
}
