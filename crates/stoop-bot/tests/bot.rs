//! End-to-end scenario: four peers join, act, and discover.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use futures::future::BoxFuture;

use stoop_bot::{
    DidDocument, Event, NeighborhoodBot, PeerId, ProfileFields, ProfileListMessage,
    ProfileSender, RankedProfile, Result,
};

struct CaptureSender {
    sent: Mutex<Vec<(PeerId, ProfileListMessage)>>,
}

impl CaptureSender {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }
}

impl ProfileSender for CaptureSender {
    fn send_profiles(
        &self,
        to: PeerId,
        message: ProfileListMessage,
    ) -> BoxFuture<'static, Result<()>> {
        self.sent.lock().unwrap().push((to, message));
        Box::pin(async { Ok(()) })
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn peer(name: &str) -> PeerId {
    PeerId::new(name)
}

fn did_for(name: &str) -> DidDocument {
    DidDocument {
        id: name.to_owned(),
        ik: "aWs=".into(),
        ek: Some("ZWs=".into()),
        endpoints: vec![format!("wss://sme.example/{name}")],
    }
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 12, minute, 0).unwrap()
}

fn relationship(from: &str, to: &str, action: &str, minute: u32) -> Event {
    Event::Relationship {
        from: peer(from),
        to: peer(to),
        action: action.to_owned(),
        digest: format!("{from}-{to}-{minute}"),
        time: at(minute),
    }
}

fn score_of(ranked: &[RankedProfile], name: &str) -> f64 {
    ranked
        .iter()
        .find(|entry| entry.did.as_ref().is_some_and(|d| d.id == name))
        .map(|entry| entry.scores.score)
        .unwrap_or_else(|| panic!("{name} missing from ranked list"))
}

#[tokio::test]
async fn neighborhood_lifecycle() {
    init_tracing();
    let capture = CaptureSender::new();
    let mut bot = NeighborhoodBot::new(capture.clone());

    for name in ["alice", "bob", "charlie", "darcy"] {
        bot.handle_event(Event::Join {
            peer: peer(name),
            did: did_for(name),
        })
        .await
        .unwrap();
    }
    bot.handle_event(Event::ProfileUpdate {
        peer: peer("alice"),
        fields: ProfileFields {
            title: Some("Alice".into()),
            description: Some("first on the block".into()),
            avatar: Some("hugebase64blob".into()),
        },
    })
    .await
    .unwrap();

    // Fresh neighborhood: everyone scores the same.
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let (to, message) = sent.last().unwrap();
        assert_eq!(to, &peer("alice"));
        assert_eq!(message.kind, "profiles");
        assert_eq!(message.after, "0");
        assert_eq!(message.data.len(), 4);
        let baseline = message.data[0].scores.score;
        for entry in &message.data {
            assert!((entry.scores.score - baseline).abs() < 1e-9);
        }
        // The avatar blob was dropped before storage.
        let json = serde_json::to_string(&message.data).unwrap();
        assert!(!json.contains("hugebase64blob"));
        assert!(json.contains("first on the block"));
    }

    // Alice smashes Bob: Bob outranks Charlie and Darcy.
    bot.handle_event(relationship("alice", "bob", "smash", 1))
        .await
        .unwrap();
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let ranked = &sent.last().unwrap().1.data;
        assert!(score_of(ranked, "bob") > score_of(ranked, "charlie"));
        assert!(score_of(ranked, "bob") > score_of(ranked, "darcy"));
    }

    // Bob smashes Charlie: rank flows through, Charlie outranks Darcy.
    bot.handle_event(relationship("bob", "charlie", "smash", 2))
        .await
        .unwrap();
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let ranked = &sent.last().unwrap().1.data;
        assert!(score_of(ranked, "charlie") > score_of(ranked, "darcy"));
        assert!(score_of(ranked, "bob") > score_of(ranked, "darcy"));
    }

    // Alice passes on Bob: her endorsement is withdrawn and Bob sinks.
    bot.handle_event(relationship("alice", "bob", "pass", 3))
        .await
        .unwrap();
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let ranked = &sent.last().unwrap().1.data;
        assert!(score_of(ranked, "bob") < score_of(ranked, "charlie"));
        assert!(score_of(ranked, "bob") < score_of(ranked, "darcy"));
    }

    // A late-arriving older smash does not resurrect the endorsement.
    bot.handle_event(relationship("alice", "bob", "smash", 1))
        .await
        .unwrap();
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let ranked = &sent.last().unwrap().1.data;
        assert!(score_of(ranked, "bob") < score_of(ranked, "charlie"));
    }

    // Clear restores the neutral baseline.
    bot.handle_event(relationship("alice", "bob", "clear", 4))
        .await
        .unwrap();
    bot.handle_event(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    {
        let sent = capture.sent.lock().unwrap();
        let ranked = &sent.last().unwrap().1.data;
        assert!((score_of(ranked, "bob") - score_of(ranked, "darcy")).abs() < 1e-9);
    }
}

#[tokio::test]
async fn bot_survives_garbage_and_strangers() {
    init_tracing();
    let capture = CaptureSender::new();
    let (tx, rx) = tokio::sync::mpsc::channel(16);
    let bot = NeighborhoodBot::new(capture.clone());
    let task = tokio::spawn(bot.run(rx));

    tx.send(Event::Join {
        peer: peer("alice"),
        did: did_for("alice"),
    })
    .await
    .unwrap();
    // A stranger's discovery errors internally; the loop keeps going.
    tx.send(Event::Discover {
        peer: peer("mallory"),
    })
    .await
    .unwrap();
    // An unknown verb is warned about and dropped.
    tx.send(relationship("alice", "bob", "superlike", 1))
        .await
        .unwrap();
    tx.send(Event::Discover { peer: peer("alice") })
        .await
        .unwrap();
    drop(tx);
    task.await.unwrap();

    let sent = capture.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, peer("alice"));
}
