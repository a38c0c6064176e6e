use crate::picker::Debouncer;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Custom hook that delays `on_settle` until no new value arrived for `delay_ms`.
///
/// Every emitted value restarts the timer. Replacing the stored `Timeout`
/// cancels the previous one; the [`Debouncer`] generation check covers a
/// callback that was already queued when it got replaced.
#[hook]
pub fn use_debounce<T: 'static>(delay_ms: u32, on_settle: Callback<T>) -> Callback<T> {
    let debouncer = use_mut_ref(Debouncer::<T>::default);
    let timer = use_mut_ref(|| None::<Timeout>);

    Callback::from(move |value: T| {
        let generation = debouncer.borrow_mut().push(value);

        let debouncer = debouncer.clone();
        let on_settle = on_settle.clone();
        let handle = Timeout::new(delay_ms, move || {
            let settled = debouncer.borrow_mut().fire(generation);
            if let Some(value) = settled {
                on_settle.emit(value);
            }
        });
        *timer.borrow_mut() = Some(handle);
    })
}
