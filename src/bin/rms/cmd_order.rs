use anyhow::{anyhow, Result};

use triobites::{Order, OrderDraft, RmsConfig, Session};

use super::cli::OrderCmd;
use super::util::{finish, money, parse_item_spec, print_json, read_snapshot};

pub fn exec(cfg: &RmsConfig, op: OrderCmd) -> Result<()> {
    match op {
        OrderCmd::List { json } => list(cfg, json),
        OrderCmd::Show { id, json } => show(cfg, id, json),
        op => mutate(cfg, op),
    }
}

fn mutate(cfg: &RmsConfig, op: OrderCmd) -> Result<()> {
    let mut s = Session::open(cfg)?;
    match op {
        OrderCmd::Add { customer, items } => {
            let mut draft = OrderDraft::new();
            append_lines(&s, &mut draft, &items)?;
            let o = s.place_order(customer, &draft)?;
            println!(
                "OK order add: id={} customer='{}' lines={} total={}",
                o.id,
                o.customer_name,
                o.item_count(),
                money(o.total())
            );
        }
        OrderCmd::Update {
            id,
            customer,
            remove_lines,
            replace,
            items,
        } => {
            let current = match s.orders().find_by_id(id) {
                Some(o) => o,
                None => {
                    println!("NOT FOUND order {}", id);
                    finish(s);
                    return Ok(());
                }
            };
            let mut draft = if replace {
                OrderDraft::new()
            } else {
                OrderDraft::from_order(&current)
            };

            // Удаляем с конца, чтобы номера строк не сдвигались.
            let mut remove = remove_lines;
            remove.sort_unstable();
            remove.dedup();
            for n in remove.into_iter().rev() {
                if n == 0 || draft.remove(n - 1).is_none() {
                    return Err(anyhow!("order {} has no line {}", id, n));
                }
            }
            append_lines(&s, &mut draft, &items)?;

            let customer_id = customer.unwrap_or(current.customer_id);
            if s.update_order(id, customer_id, &draft)? {
                println!(
                    "OK order update: id={} lines={} total={}",
                    id,
                    draft.len(),
                    money(draft.total())
                );
            } else {
                println!("NOT FOUND order {}", id);
            }
        }
        OrderCmd::Delete { id } => {
            if s.delete_order(id) {
                println!("OK order delete: id={}", id);
            } else {
                println!("NOT FOUND order {}", id);
            }
        }
        OrderCmd::List { .. } | OrderCmd::Show { .. } => {}
    }
    finish(s);
    Ok(())
}

fn list(cfg: &RmsConfig, json: bool) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    if json {
        return print_json(&snap.orders);
    }
    if snap.orders.is_empty() {
        println!("(no orders)");
        return Ok(());
    }
    println!("{:>5}  {:<24}  {:>5}  {:>10}", "ID", "CUSTOMER", "ITEMS", "TOTAL");
    for o in &snap.orders {
        println!(
            "{:>5}  {:<24}  {:>5}  {:>10}",
            o.id,
            o.customer_name,
            o.item_count(),
            money(o.total())
        );
    }
    Ok(())
}

fn show(cfg: &RmsConfig, id: u32, json: bool) -> Result<()> {
    let snap = read_snapshot(cfg)?;
    let o = snap
        .orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| anyhow!("order {} not found", id))?;
    if json {
        print_json(o)
    } else {
        print_order(o);
        Ok(())
    }
}

fn append_lines(s: &Session, draft: &mut OrderDraft, specs: &[String]) -> Result<()> {
    for spec in specs {
        let (menu_id, qty) = parse_item_spec(spec)?;
        draft.push(s.draft_line(menu_id, qty)?);
    }
    Ok(())
}

fn print_order(o: &Order) {
    println!("Order {}", o.id);
    println!("  customer   = {} (id {})", o.customer_name, o.customer_id);
    println!("  created_ms = {}", o.created_unix_ms);
    println!("  {:>3}  {:<24}  {:>10}  {:>5}  {:>10}", "#", "ITEM", "UNIT", "QTY", "LINE");
    for (i, line) in o.items.iter().enumerate() {
        println!(
            "  {:>3}  {:<24}  {:>10}  {:>5}  {:>10}",
            i + 1,
            line.menu_item_name,
            money(line.unit_price),
            line.quantity,
            money(line.line_total())
        );
    }
    println!("  total      = {}", money(o.total()));
}
