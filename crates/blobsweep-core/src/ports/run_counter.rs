//! RunCounter port - 完了した cleanup run の数
//!
//! プロセス全体で共有されるカウンタ。`Arc<dyn RunCounter>` で注入する。

pub trait RunCounter: Send + Sync {
    fn increment(&self);
}
