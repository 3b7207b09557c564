use std::{cell::RefCell, rc::Rc};

use page_runtime::PageSession;
use shared::{
    config::{CarouselConfig, TrackerConfig},
    domain::{Direction, SectionGeometry, SectionId},
    error::ErrorCode,
    protocol::{HostEvent, RenderUpdate},
};

fn session(period_ms: u64) -> PageSession {
    PageSession::with_defaults(
        &TrackerConfig::default(),
        &CarouselConfig::with_period_ms(period_ms),
    )
    .expect("session")
}

fn scroll_to_about() -> HostEvent {
    HostEvent::Scroll {
        scroll_y: 900.0,
        sections: vec![
            SectionGeometry::new("home", -900.0),
            SectionGeometry::new("about", 80.0),
            SectionGeometry::new("skills", 800.0),
            SectionGeometry::new("hobbies", 1_600.0),
            SectionGeometry::new("contact", 2_400.0),
        ],
    }
}

#[test]
fn autoplay_runs_from_mount_on_the_virtual_clock() {
    let mut page = session(5);
    let updates = page.handle(&HostEvent::Elapsed { ms: 35 });

    assert_eq!(updates.len(), 7);
    assert_eq!(page.carousel().current_index(), 3);
    assert_eq!(page.carousel().current_slide().payload.title, "Sustain");
    assert_eq!(page.elapsed().as_millis(), 35);
}

#[test]
fn hover_suspends_autoplay_without_resetting_cadence() {
    let mut page = session(5);
    page.handle(&HostEvent::Elapsed { ms: 3 });
    page.handle(&HostEvent::PointerEnter);

    assert!(page.handle(&HostEvent::Elapsed { ms: 10 }).is_empty());
    assert_eq!(page.carousel().current_index(), 0);

    page.handle(&HostEvent::PointerLeave);
    let updates = page.handle(&HostEvent::Elapsed { ms: 2 });
    assert_eq!(updates.len(), 1);
    assert_eq!(page.carousel().current_index(), 1);
}

#[test]
fn dot_clicks_report_direction_and_rejections() {
    let mut page = session(5_000);
    page.handle(&HostEvent::DotClicked { index: 3 });
    let updates = page.handle(&HostEvent::DotClicked { index: 0 });

    let [RenderUpdate::Carousel(state)] = updates.as_slice() else {
        panic!("expected one carousel update, got {updates:?}");
    };
    assert_eq!(state.current_index, 0);
    assert_eq!(state.direction, Direction::Backward);

    let updates = page.handle(&HostEvent::DotClicked { index: 4 });
    let [RenderUpdate::Rejected(report)] = updates.as_slice() else {
        panic!("expected a rejection, got {updates:?}");
    };
    assert_eq!(report.code, ErrorCode::OutOfRange);
    assert_eq!(page.carousel().current_index(), 0);
}

#[test]
fn scroll_and_navigation_clicks_update_the_nav_bar() {
    let mut page = session(5_000);

    let updates = page.handle(&scroll_to_about());
    let [RenderUpdate::Navigation(state)] = updates.as_slice() else {
        panic!("expected a navigation update, got {updates:?}");
    };
    assert_eq!(state.active.as_str(), "about");
    assert!(state.is_scrolled);

    assert!(page.handle(&scroll_to_about()).is_empty());

    page.handle(&HostEvent::MenuToggled);
    let updates = page.handle(&HostEvent::NavClicked {
        section: SectionId::from("contact"),
    });
    assert_eq!(updates.len(), 2);
    assert!(matches!(
        &updates[0],
        RenderUpdate::ScrollRequested(request) if request.target.as_str() == "contact"
    ));
    assert!(!page.navigation().is_menu_open());
}

#[test]
fn teardown_silences_late_ticks_and_commands() {
    let mut page = session(5);
    page.handle(&HostEvent::Elapsed { ms: 5 });
    let updates = page.handle(&HostEvent::Teardown);
    assert_eq!(updates.len(), 1);
    assert!(page.handle(&HostEvent::Teardown).is_empty());

    assert!(page.handle(&HostEvent::Elapsed { ms: 50 }).is_empty());
    assert!(page.handle(&HostEvent::NextClicked).is_empty());
    assert!(page.handle(&HostEvent::DotClicked { index: 99 }).is_empty());
    assert_eq!(page.carousel().current_index(), 1);
    assert!(!page.carousel().is_running());
}

#[test]
fn listeners_receive_every_update_until_unsubscribed() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut page = session(5);
    let listener = {
        let seen = Rc::clone(&seen);
        page.subscribe(move |update| seen.borrow_mut().push(update.clone()))
    };

    page.handle(&HostEvent::NextClicked);
    page.handle(&HostEvent::Elapsed { ms: 5 });
    assert_eq!(seen.borrow().len(), 2);

    assert!(page.unsubscribe(listener));
    page.handle(&HostEvent::PrevClicked);
    assert_eq!(seen.borrow().len(), 2);
}
