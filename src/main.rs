use log::info;
use romload::error::LoadError;
use romload::loader::load_program;
use romload::stream::write_program;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process;

fn usage(program_name: &str) {
    println!("Usage: {} <image-file> [--write-srec <output-file>]", program_name);
    println!();
    println!("Loads a program image and prints its memory blocks.");
    println!("Supported suffixes: .prg, .shex, .srec, .s19");
    println!();
    println!("  --write-srec <output-file>  re-emit the image as a linked S-Record stream");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
        return;
    }

    let image_path = &args[1];
    let mut srec_output: Option<&String> = None;
    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            "--write-srec" => {
                if index + 1 >= args.len() {
                    eprintln!("Error: --write-srec needs an output filename");
                    process::exit(1);
                }
                srec_output = Some(&args[index + 1]);
                index += 2;
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                usage(&args[0]);
                process::exit(1);
            }
        }
    }

    info!("loading image '{}'", image_path);
    let program = match load_program(image_path) {
        Ok(program) => program,
        Err(LoadError::FileNotFound(path)) => {
            eprintln!("Error: file '{}' not found.", path);
            eprintln!("Please check the path and try again.");
            process::exit(1);
        }
        Err(LoadError::UnsupportedFormat(suffix)) => {
            eprintln!("Error: no codec for filename suffix '{}'.", suffix);
            eprintln!("Supported suffixes: .prg, .shex, .srec, .s19");
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error loading '{}': {}", image_path, error);
            process::exit(1);
        }
    };

    print!("{}", program);

    if let Some(output_path) = srec_output {
        let file = match File::create(output_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error: cannot create '{}': {}", output_path, e);
                process::exit(1);
            }
        };
        if let Err(error) = write_program(&program, BufWriter::new(file)) {
            eprintln!("Error writing '{}': {}", output_path, error);
            process::exit(1);
        }
        info!("wrote S-Record stream to '{}'", output_path);
    }
}
