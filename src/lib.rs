// Базовые модули
pub mod consts;
pub mod config;
pub mod lock;
pub mod metrics;
pub mod util;

// Записи и менеджеры
pub mod model;   // src/model/{mod,customer,menu_item,order}.rs
pub mod manager; // src/manager/{mod,table,customer,menu_item,order}.rs

// Снапшот (один файл на всё состояние)
pub mod snapshot; // src/snapshot/{mod,codec}.rs

// Оболочка приложения: менеджеры + store + сохранение после каждой мутации
pub mod session;

// Удобные реэкспорты
pub use config::{RmsConfig, StoreBuilder};
pub use manager::{CustomerManager, MenuItemManager, OrderManager};
pub use model::{Customer, Id, MenuItem, Order, OrderDraft, OrderItem};
pub use session::{parse_price, Session};
pub use snapshot::{Snapshot, SnapshotStore};
