use anyhow::{anyhow, Result};

use triobites::{parse_price, RmsConfig, Session};

use super::cli::MenuCmd;
use super::util::{finish, money, print_json, read_snapshot};

pub fn exec(cfg: &RmsConfig, op: MenuCmd) -> Result<()> {
    match op {
        MenuCmd::List { json } => list(cfg, json),
        MenuCmd::Show { id } => show(cfg, id),
        op => mutate(cfg, op),
    }
}

fn mutate(cfg: &RmsConfig, op: MenuCmd) -> Result<()> {
    let mut s = Session::open(cfg)?;
    match op {
        MenuCmd::Add { name, price } => {
            let price = parse_price(&price)?;
            let m = s.add_menu_item(&name, price)?;
            println!("OK menu add: id={} {}", m.id, m);
        }
        MenuCmd::Update { id, name, price } => {
            let price = parse_price(&price)?;
            if s.update_menu_item(id, &name, price)? {
                println!("OK menu update: id={}", id);
            } else {
                println!("NOT FOUND menu item {}", id);
            }
        }
        MenuCmd::Delete { id } => {
            if s.delete_menu_item(id) {
                println!("OK menu delete: id={}", id);
            } else {
                println!("NOT FOUND menu item {}", id);
            }
        }
        MenuCmd::List { .. } | MenuCmd::Show { .. } => {}
    }
    finish(s);
    Ok(())
}

fn list(cfg: &RmsConfig, json: bool) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    if json {
        return print_json(&snap.menu_items);
    }
    if snap.menu_items.is_empty() {
        println!("(no menu items)");
        return Ok(());
    }
    println!("{:>5}  {:<24}  {:>10}", "ID", "NAME", "PRICE");
    for m in &snap.menu_items {
        println!("{:>5}  {:<24}  {:>10}", m.id, m.name, money(m.price));
    }
    Ok(())
}

fn show(cfg: &RmsConfig, id: u32) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    let m = snap
        .menu_items
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("menu item {} not found", id))?;
    println!("id    = {}", m.id);
    println!("name  = {}", m.name);
    println!("price = {}", money(m.price));
    Ok(())
}
