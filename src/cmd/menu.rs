//! The interactive menu, used when no subcommand is given.
//!
//! Mirrors the numbered-selection flow of the classic console tool: a main
//! menu, then a picker over documents or image folders, `0` to go back.

use std::io::{self, Write as _};

use crate::{
    cmd::{extract::extract_document, ocr::run_folder},
    discover,
    ocr::tesseract::{DEFAULT_LANGUAGES, TesseractEngine},
    prelude::*,
    ui::Ui,
};

/// Run the interactive menu loop.
pub fn cmd_menu(ui: &Ui, output_root: &Path) -> Result<()> {
    loop {
        println!();
        println!("1  extract images from a document");
        println!("2  recognize text in an image folder");
        println!("0  quit");
        let Some(choice) = prompt()? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => extract_menu(output_root)?,
            "2" => ocr_menu(ui, output_root)?,
            "0" => return Ok(()),
            _ => println!("invalid choice"),
        }
    }
}

/// Numbered picker over the documents in the current directory.
fn extract_menu(output_root: &Path) -> Result<()> {
    loop {
        let documents = discover::documents_in(Path::new("."))?;
        if documents.is_empty() {
            println!("no documents (.pdf/.doc/.docx) in the current directory");
            return Ok(());
        }
        for (index, document) in documents.iter().enumerate() {
            println!("{:3}  {}", index + 1, document.path.display());
        }
        println!("  0  back");
        let Some(choice) = prompt()? else {
            return Ok(());
        };
        if choice == "0" {
            return Ok(());
        }
        match choice.parse::<usize>() {
            Ok(n) if (1..=documents.len()).contains(&n) => {
                if let Err(err) = extract_document(&documents[n - 1], output_root) {
                    println!("error: {err:#}");
                }
            }
            _ => println!("invalid choice"),
        }
    }
}

/// Numbered picker over the image folders under the output root.
fn ocr_menu(ui: &Ui, output_root: &Path) -> Result<()> {
    // Check the engine once, before offering any folder.
    if let Err(err) = TesseractEngine::probe() {
        println!("{err:#}");
        return Ok(());
    }
    let engine = TesseractEngine::new(DEFAULT_LANGUAGES);

    loop {
        let folders = discover::image_folders(output_root)?;
        if folders.is_empty() {
            println!("no image folders under {}", output_root.display());
            return Ok(());
        }
        for (index, folder) in folders.iter().enumerate() {
            println!("{:3}  {}", index + 1, folder.display());
        }
        println!("  0  back");
        let Some(choice) = prompt()? else {
            return Ok(());
        };
        if choice == "0" {
            return Ok(());
        }
        match choice.parse::<usize>() {
            Ok(n) if (1..=folders.len()).contains(&n) => {
                if let Err(err) = run_folder(ui, &engine, &folders[n - 1]) {
                    println!("error: {err:#}");
                }
            }
            _ => println!("invalid choice"),
        }
    }
}

/// Read one trimmed line from stdin; `None` on end of input.
fn prompt() -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
