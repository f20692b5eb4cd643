use super::*;
use futures::StreamExt;
use futures::executor::block_on;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn subscription_yields_events_in_order() {
    let (tx, rx) = mpsc::unbounded::<Option<u8>>();
    let mut sub = IdentitySubscription::detached(rx);
    tx.unbounded_send(Some(1)).unwrap();
    tx.unbounded_send(None).unwrap();
    drop(tx);

    let events: Vec<Option<u8>> = block_on(async { (&mut sub).collect().await });
    assert_eq!(events, vec![Some(1), None]);
}

#[test]
fn dropping_subscription_unsubscribes_once() {
    let calls = Rc::new(Cell::new(0));
    let (_tx, rx) = mpsc::unbounded::<Option<u8>>();
    let counter = Rc::clone(&calls);
    let sub = IdentitySubscription::new(rx, move || counter.set(counter.get() + 1));
    assert_eq!(calls.get(), 0);
    drop(sub);
    assert_eq!(calls.get(), 1);
}
