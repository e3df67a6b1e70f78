//! Cross-platform sleeping for the export settle step.

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    if ms == 0 {
        return;
    }
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    if ms == 0 {
        return;
    }
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
