use gauntlet_primitives::{
    events::AuctionCompleteBroadcastData, AuctionEvent, AuctionId,
};
use gauntlet_server::{engine::Notifier, subscription_manager::SubscriptionManager};

#[test]
/// Ensures a broadcast is sending data correctly.
fn should_broadcast() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::default();
    let mut recv = subscription_manager.add_subscription();
    assert_eq!(subscription_manager.broadcast(1).unwrap(), 1);
    assert_eq!(recv.blocking_recv().unwrap(), 1);
}

#[test]
fn should_not_broadcast_without_receivers() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::default();
    assert!(subscription_manager.broadcast(1).is_err());
}

#[test]
/// Ensures only the latest item is kept for a receiver once the buffer is full.
fn should_receive_lagged() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::new(1);
    let mut r1 = subscription_manager.add_subscription();
    subscription_manager.broadcast(1).unwrap();
    subscription_manager.broadcast(2).unwrap();
    assert!(matches!(
        r1.blocking_recv(),
        Err(tokio::sync::broadcast::error::RecvError::Lagged(1))
    ));
    assert_eq!(r1.blocking_recv().unwrap(), 2);
}

#[test]
fn zero_capacity_is_clamped() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::new(0);
    let mut recv = subscription_manager.add_subscription();
    subscription_manager.broadcast(7).unwrap();
    assert_eq!(recv.blocking_recv().unwrap(), 7);
}

#[test]
fn should_broadcast_multiple_times_to_many_subscribers() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::new(10);
    let mut r1 = subscription_manager.add_subscription();
    let mut r2 = subscription_manager.add_subscription();
    assert_eq!(subscription_manager.active_subscriptions(), 2);
    for i in 0..10 {
        assert_eq!(subscription_manager.broadcast(i).unwrap(), 2);
    }
    for i in 0..10 {
        assert_eq!(r1.blocking_recv().unwrap(), i);
        assert_eq!(r2.blocking_recv().unwrap(), i);
    }
}

#[test]
/// A dropped receiver (the subscriber's connection went away) stops counting as active.
fn should_drop_receivers() {
    let subscription_manager: SubscriptionManager<i32> = SubscriptionManager::default();
    let recv = subscription_manager.add_subscription();
    drop(recv);
    let _ = subscription_manager.broadcast(1).unwrap_err();
    assert_eq!(subscription_manager.active_subscriptions(), 0);
}

#[test]
fn notifies_auction_events() {
    let subscription_manager: SubscriptionManager<AuctionEvent> = SubscriptionManager::default();
    let event = AuctionEvent::AuctionComplete(AuctionCompleteBroadcastData {
        auction_id: AuctionId::new([1, 2, 3, 4]),
        winning_relayer: None,
    });
    assert!(subscription_manager.notify(event.clone()).is_err());

    let mut recv = subscription_manager.add_subscription();
    assert_eq!(subscription_manager.notify(event.clone()).unwrap(), 1);
    assert_eq!(recv.blocking_recv().unwrap(), event);
}
