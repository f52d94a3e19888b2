mod panel;

pub use panel::PanelPage;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
