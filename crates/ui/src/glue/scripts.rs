use services::{ContainerId, FormKey};

pub(super) const FORM_OBSERVER_KEY: &str = "__quizLeadFormObserver";

/// Load the forms script once, wait for the container, create the form and
/// report lifecycle back over `dioxus.send`.
pub(super) fn form_mount_script(script_url: &str, form: &FormKey, container: &ContainerId) -> String {
    format!(
        r##"(function() {{
                    const scriptUrl = {script_url:?};
                    const containerId = {container_id:?};
                    const observerKey = {observer_key:?};
                    const report = (event) => dioxus.send(event);
                    const restyle = (root) => {{
                        root.querySelectorAll("input, select, textarea").forEach((el) => {{
                            el.classList.add("lead-form__field");
                        }});
                        root.querySelectorAll("input[type=submit], button").forEach((el) => {{
                            el.classList.add("btn", "btn-primary");
                        }});
                        root.querySelectorAll("label").forEach((el) => {{
                            el.classList.add("lead-form__label");
                        }});
                    }};
                    const observe = (root) => {{
                        if (window[observerKey]) window[observerKey].disconnect();
                        const observer = new MutationObserver(() => restyle(root));
                        observer.observe(root, {{ childList: true, subtree: true }});
                        window[observerKey] = observer;
                    }};
                    const create = (attempt) => {{
                        const root = document.getElementById(containerId);
                        if (!root) {{
                            if (attempt < 40) {{
                                setTimeout(() => create(attempt + 1), 50);
                            }} else {{
                                report("failed:container");
                            }}
                            return;
                        }}
                        if (!window.hbspt || !window.hbspt.forms) {{
                            report("failed:script");
                            return;
                        }}
                        root.innerHTML = "";
                        window.hbspt.forms.create({{
                            region: {region:?},
                            portalId: {portal_id:?},
                            formId: {form_id:?},
                            target: "#" + containerId,
                            onFormReady: () => {{
                                restyle(root);
                                observe(root);
                                report("ready");
                            }},
                            onFormSubmit: () => report("submitted"),
                            onFormSubmitted: () => report("completed"),
                        }});
                    }};
                    if (window.hbspt && window.hbspt.forms) {{
                        create(0);
                        return;
                    }}
                    let script = document.querySelector('script[data-lead-form="1"]');
                    if (script && script.dataset.loaded === "1") {{
                        create(0);
                        return;
                    }}
                    if (!script) {{
                        script = document.createElement("script");
                        script.src = scriptUrl;
                        script.async = true;
                        script.dataset.leadForm = "1";
                        script.addEventListener("load", () => {{
                            script.dataset.loaded = "1";
                        }}, {{ once: true }});
                        script.addEventListener("error", () => script.remove(), {{ once: true }});
                        document.head.appendChild(script);
                    }}
                    script.addEventListener("load", () => create(0), {{ once: true }});
                    script.addEventListener("error", () => report("failed:script"), {{ once: true }});
                }})();"##,
        script_url = script_url,
        container_id = container.as_str(),
        observer_key = FORM_OBSERVER_KEY,
        region = form.region,
        portal_id = form.portal_id,
        form_id = form.form_id,
    )
}

pub(super) fn form_unmount_script(container: &ContainerId) -> String {
    format!(
        r#"(function() {{
                    const observer = window[{observer_key:?}];
                    if (observer) {{
                        observer.disconnect();
                        window[{observer_key:?}] = null;
                    }}
                    const root = document.getElementById({container_id:?});
                    if (root) root.innerHTML = "";
                }})();"#,
        observer_key = FORM_OBSERVER_KEY,
        container_id = container.as_str(),
    )
}

pub(super) fn track_script(name: &str, properties_json: &str) -> String {
    format!(
        r#"(function() {{
                    const analytics = window.analytics;
                    if (analytics && typeof analytics.track === "function") {{
                        analytics.track({name:?}, {properties_json});
                    }}
                }})();"#,
    )
}

pub(crate) fn scroll_into_view_script(element_id: &str) -> String {
    format!(
        r#"document.getElementById({element_id:?})?.scrollIntoView({{ behavior: "smooth" }});"#,
    )
}
