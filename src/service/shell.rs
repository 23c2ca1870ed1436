use anyhow::Result;

use super::{add, create, edit, show, to_index, Context};
use crate::ui::{Output, Prompt};

const MAIN_MENU: [&str; 4] = [
    "Create a new database",
    "Open an existing database",
    "Delete a database",
    "Exit",
];

const DATABASE_MENU: [&str; 5] = [
    "Add a record",
    "Edit a record",
    "Delete a record",
    "Display all records",
    "Back to main menu",
];

/// 交互式菜单循环
///
/// 单个操作失败只打印错误并回到菜单；菜单本身读取失败（如输入流关闭）则退出。
pub fn shell(ctx: &Context) -> Result<()> {
    let output = Output::new();
    let prompt = Prompt::new();

    loop {
        eprintln!();
        let result = match prompt.select("Main menu", &MAIN_MENU)? {
            0 => create_database(ctx, &prompt),
            1 => open_database(ctx, &output, &prompt),
            2 => delete_database(ctx, &output, &prompt),
            _ => break,
        };

        if let Err(e) = result {
            output.error(&format!("{:#}", e));
        }
    }

    output.info("Exiting the program.");
    Ok(())
}

fn create_database(ctx: &Context, prompt: &Prompt) -> Result<()> {
    let name = prompt.text("Name of the new database")?;
    if name.is_empty() {
        anyhow::bail!("Database name cannot be empty");
    }
    create::create(ctx, &name, &[])
}

/// 选择一个已有数据库；没有数据库时返回 None
fn choose_database(ctx: &Context, output: &Output, prompt: &Prompt) -> Result<Option<String>> {
    let mut names = ctx.store.list()?;
    if names.is_empty() {
        output.info("No databases found. Returning to the main menu.");
        return Ok(None);
    }

    names.sort();
    let items: Vec<&str> = names.iter().map(String::as_str).collect();
    let choice = prompt.select("Database", &items)?;
    Ok(Some(names.swap_remove(choice)))
}

fn open_database(ctx: &Context, output: &Output, prompt: &Prompt) -> Result<()> {
    let Some(name) = choose_database(ctx, output, prompt)? else {
        return Ok(());
    };

    loop {
        eprintln!();
        let result = match prompt.select(&format!("Database menu - {}", name), &DATABASE_MENU)? {
            0 => add::add(ctx, &name, &[]),
            1 => edit_record(ctx, output, prompt, &name),
            2 => delete_record(ctx, output, prompt, &name),
            3 => show::show(ctx, &name, false),
            _ => break,
        };

        if let Err(e) = result {
            output.error(&format!("{:#}", e));
        }
    }

    Ok(())
}

/// 读取记录编号；空数据库返回 None
fn choose_record(ctx: &Context, output: &Output, prompt: &Prompt, name: &str) -> Result<Option<usize>> {
    let record_count = ctx.store.count(name)?;
    if record_count == 0 {
        output.info("No records found. Please add a record first.");
        return Ok(None);
    }
    Ok(Some(prompt.record_number(record_count)?))
}

fn edit_record(ctx: &Context, output: &Output, prompt: &Prompt, name: &str) -> Result<()> {
    match choose_record(ctx, output, prompt, name)? {
        Some(number) => edit::edit(ctx, name, number, &[]),
        None => Ok(()),
    }
}

fn delete_record(ctx: &Context, output: &Output, prompt: &Prompt, name: &str) -> Result<()> {
    let Some(number) = choose_record(ctx, output, prompt, name)? else {
        return Ok(());
    };
    let index = to_index(number)?;

    let record = ctx.store.get(name, index)?;
    output.record(number, &record);

    if !prompt.confirm(&format!("Are you sure you want to delete record {}?", number))? {
        output.info("Deletion canceled.");
        return Ok(());
    }

    ctx.store.remove(name, index)?;
    output.status("Deleted", &format!("record {}", number));
    Ok(())
}

fn delete_database(ctx: &Context, output: &Output, prompt: &Prompt) -> Result<()> {
    let Some(name) = choose_database(ctx, output, prompt)? else {
        return Ok(());
    };

    if !prompt.confirm(&format!(
        "Are you sure you want to delete the database '{}'?",
        name
    ))? {
        output.info("Deletion canceled.");
        return Ok(());
    }

    ctx.store.delete(&name)?;
    output.status("Deleted", &format!("database {}", name));
    Ok(())
}
