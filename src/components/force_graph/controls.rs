//! Overlay controls: zoom, fit, export, kind filter and a live settings panel.

use leptos::prelude::*;

use super::config::GraphOptions;

/// An imperative request from the controls to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCommand {
	/// Zoom in one step about the canvas center.
	ZoomIn,
	/// Zoom out one step about the canvas center.
	ZoomOut,
	/// Frame every node.
	FitView,
	/// Snapshot the canvas as PNG.
	Export,
	/// Show only nodes of this kind; `None` shows all.
	SetKindFilter(Option<String>),
}

/// Value of the "all kinds" entry of the filter select.
const ALL_KINDS: &str = "";

/// Button bar plus settings panel. Settings write straight into `options`;
/// everything else goes through `on_command`.
#[component]
pub fn GraphControls<F>(
	options: RwSignal<GraphOptions>,
	#[prop(into)] kinds: Signal<Vec<String>>,
	on_command: F,
) -> impl IntoView
where
	F: Fn(ControlCommand) + Clone + 'static,
{
	let (settings_open, set_settings_open) = signal(false);

	let on_filter = {
		let on_command = on_command.clone();
		move |ev: web_sys::Event| {
			let value = event_target_value(&ev);
			let kind = (value != ALL_KINDS).then_some(value);
			on_command(ControlCommand::SetKindFilter(kind));
		}
	};

	let button = move |label: &'static str, title: &'static str, command: ControlCommand| {
		let on_command = on_command.clone();
		view! {
			<button
				class="graph-control"
				title=title
				on:click=move |_| on_command(command.clone())
			>
				{label}
			</button>
		}
	};

	view! {
		<div class="graph-controls">
			<div class="graph-controls-bar">
				{button("+", "Zoom in", ControlCommand::ZoomIn)}
				{button("\u{2212}", "Zoom out", ControlCommand::ZoomOut)}
				{button("Fit", "Fit view", ControlCommand::FitView)}
				{button("PNG", "Export as PNG", ControlCommand::Export)}
				<select class="graph-kind-filter" on:change=on_filter>
					<option value=ALL_KINDS>"All types"</option>
					<For
						each=move || kinds.get()
						key=|kind| kind.clone()
						children=move |kind| {
							let value = kind.clone();
							view! { <option value=value>{kind}</option> }
						}
					/>
				</select>
				<button
					class="graph-control"
					title="Settings"
					on:click=move |_| set_settings_open.update(|open| *open = !*open)
				>
					"\u{2699}"
				</button>
			</div>
			<Show when=move || settings_open.get()>
				<div class="graph-settings">
					<Toggle
						label="Labels"
						options=options
						get=|o| o.render.node_labels
						set=|o, v| o.render.node_labels = v
					/>
					<Toggle
						label="Arrows"
						options=options
						get=|o| o.render.edge_arrows
						set=|o, v| o.render.edge_arrows = v
					/>
					<Toggle
						label="Links"
						options=options
						get=|o| o.render.render_links
						set=|o, v| o.render.render_links = v
					/>
					<Toggle
						label="Simulation"
						options=options
						get=|o| o.simulation.enabled
						set=|o, v| o.simulation.enabled = v
					/>
					<Slider
						label="Gravity"
						options=options
						range=(0.0, 0.05, 0.001)
						get=|o| o.simulation.gravity
						set=|o, v| o.simulation.gravity = v
					/>
					<Slider
						label="Repulsion"
						options=options
						range=(0.0, 20000.0, 100.0)
						get=|o| o.simulation.repulsion
						set=|o, v| o.simulation.repulsion = v
					/>
					<Slider
						label="Link distance"
						options=options
						range=(10.0, 300.0, 5.0)
						get=|o| o.simulation.link_distance
						set=|o, v| o.simulation.link_distance = v
					/>
					<Slider
						label="Curvature"
						options=options
						range=(0.0, 1.0, 0.05)
						get=|o| o.render.edge_curvature
						set=|o, v| o.render.edge_curvature = v
					/>
				</div>
			</Show>
		</div>
	}
}

#[component]
fn Toggle(
	label: &'static str,
	options: RwSignal<GraphOptions>,
	get: fn(&GraphOptions) -> bool,
	set: fn(&mut GraphOptions, bool),
) -> impl IntoView {
	view! {
		<label class="graph-setting">
			<input
				type="checkbox"
				prop:checked=move || options.with(get)
				on:change=move |ev| {
					let on = event_target_checked(&ev);
					options.update(|o| set(o, on));
				}
			/>
			{label}
		</label>
	}
}

/// `range` is `(min, max, step)`.
#[component]
fn Slider(
	label: &'static str,
	options: RwSignal<GraphOptions>,
	range: (f64, f64, f64),
	get: fn(&GraphOptions) -> f64,
	set: fn(&mut GraphOptions, f64),
) -> impl IntoView {
	let (min, max, step) = range;
	view! {
		<label class="graph-setting">
			<span>{label}</span>
			<input
				type="range"
				min=min.to_string()
				max=max.to_string()
				step=step.to_string()
				prop:value=move || options.with(get).to_string()
				on:input=move |ev| {
					if let Ok(value) = event_target_value(&ev).parse::<f64>() {
						options.update(|o| set(o, value));
					}
				}
			/>
		</label>
	}
}
