//! Interactive numbered menu.
//!
//! Reads one answer per line from any `BufRead`, so a closed stdin (or the
//! end of a test script) ends the session like choosing Exit does.

use super::commands::{
    handle_add, handle_backup, handle_delete, handle_export, handle_list, handle_search,
    handle_sort, handle_stats, handle_update, AppContext,
};
use colored::Colorize;
use nodevault::error::{Result, VaultError};
use std::io::{BufRead, Write};

const MENU: &str = "
===== NodeVault =====
1. Add Record
2. List Records
3. Update Record
4. Delete Record
5. Search Records
6. Sort Records
7. Export Data
8. Backup Data
9. Statistics
10. Exit
=====================
";

enum Step {
    Continue,
    Exit,
}

struct Menu<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// `None` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn step(&mut self, ctx: &mut AppContext) -> Result<Step> {
        write!(self.out, "{}", MENU)?;
        let Some(choice) = self.prompt("Choose option: ")? else {
            return Ok(Step::Exit);
        };

        match choice.trim() {
            "1" => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(value) = self.prompt("Enter value: ")? else {
                    return Ok(Step::Exit);
                };
                handle_add(ctx, &mut self.out, name, value)?;
            }
            "2" => handle_list(ctx, &mut self.out)?,
            "3" => {
                let Some(id) = self.prompt("Enter record ID to update: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(name) = self.prompt("New name: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(value) = self.prompt("New value: ")? else {
                    return Ok(Step::Exit);
                };
                handle_update(ctx, &mut self.out, &id, name, value)?;
            }
            "4" => {
                let Some(id) = self.prompt("Enter record ID to delete: ")? else {
                    return Ok(Step::Exit);
                };
                handle_delete(ctx, &mut self.out, &id)?;
            }
            "5" => {
                if ctx.api.list()?.is_empty() {
                    writeln!(self.out, "Vault is empty. No records to search.")?;
                    return Ok(Step::Continue);
                }
                let Some(keyword) = self.prompt("Enter search keyword (ID or Name): ")? else {
                    return Ok(Step::Exit);
                };
                handle_search(ctx, &mut self.out, &keyword)?;
            }
            "6" => {
                if ctx.api.list()?.is_empty() {
                    writeln!(self.out, "Vault is empty. Nothing to sort.")?;
                    return Ok(Step::Continue);
                }
                let Some(field) = self.prompt("Choose field to sort by (name/created): ")? else {
                    return Ok(Step::Exit);
                };
                let Some(order) = self.prompt("Choose order (asc/desc): ")? else {
                    return Ok(Step::Exit);
                };
                handle_sort(ctx, &mut self.out, &field, &order)?;
            }
            "7" => handle_export(ctx, &mut self.out)?,
            "8" => handle_backup(ctx, &mut self.out)?,
            "9" => handle_stats(ctx, &mut self.out)?,
            "10" => {
                writeln!(self.out, "Exiting NodeVault...")?;
                return Ok(Step::Exit);
            }
            _ => writeln!(self.out, "Invalid option.")?,
        }
        Ok(Step::Continue)
    }

    /// Operation errors are shown and the loop goes on; only a broken output
    /// stream ends it.
    fn report(&mut self, err: &VaultError) -> Result<()> {
        match err {
            VaultError::Validation(msg) => writeln!(self.out, "{}", msg.yellow())?,
            other => writeln!(self.out, "{}", format!("Error: {}", other).red())?,
        }
        Ok(())
    }
}

pub(super) fn run<R: BufRead, W: Write>(ctx: &mut AppContext, input: R, out: W) -> Result<()> {
    let mut menu = Menu { input, out };
    loop {
        match menu.step(ctx) {
            Ok(Step::Continue) => {}
            Ok(Step::Exit) => return Ok(()),
            Err(e) => menu.report(&e)?,
        }
    }
}
