use anyhow::{anyhow, Result};

use triobites::{RmsConfig, Session};

use super::cli::CustomerCmd;
use super::util::{finish, print_json, read_snapshot};

pub fn exec(cfg: &RmsConfig, op: CustomerCmd) -> Result<()> {
    match op {
        CustomerCmd::List { json } => list(cfg, json),
        CustomerCmd::Show { id } => show(cfg, id),
        op => mutate(cfg, op),
    }
}

fn mutate(cfg: &RmsConfig, op: CustomerCmd) -> Result<()> {
    let mut s = Session::open(cfg)?;
    match op {
        CustomerCmd::Add { name, phone } => {
            let c = s.add_customer(&name, &phone)?;
            println!("OK customer add: id={} {}", c.id, c);
        }
        CustomerCmd::Update { id, name, phone } => {
            if s.update_customer(id, &name, &phone)? {
                println!("OK customer update: id={}", id);
            } else {
                println!("NOT FOUND customer {}", id);
            }
        }
        CustomerCmd::Delete { id } => {
            if s.delete_customer(id) {
                println!("OK customer delete: id={}", id);
            } else {
                println!("NOT FOUND customer {}", id);
            }
        }
        CustomerCmd::List { .. } | CustomerCmd::Show { .. } => {}
    }
    finish(s);
    Ok(())
}

fn list(cfg: &RmsConfig, json: bool) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    if json {
        return print_json(&snap.customers);
    }
    if snap.customers.is_empty() {
        println!("(no customers)");
        return Ok(());
    }
    println!("{:>5}  {:<24}  {}", "ID", "NAME", "PHONE");
    for c in &snap.customers {
        println!("{:>5}  {:<24}  {}", c.id, c.name, c.phone);
    }
    Ok(())
}

fn show(cfg: &RmsConfig, id: u32) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    let c = snap
        .customers
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("customer {} not found", id))?;
    println!("id    = {}", c.id);
    println!("name  = {}", c.name);
    println!("phone = {}", if c.phone.is_empty() { "(none)" } else { c.phone.as_str() });
    let orders = snap.orders.iter().filter(|o| o.customer_id == id).count();
    println!("orders= {}", orders);
    Ok(())
}
