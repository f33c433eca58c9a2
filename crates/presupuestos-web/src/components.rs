//! HTML fragments for the budget page
//!
//! Every function maps state to an HTML string. Fragments that htmx swaps
//! independently carry stable ids: `#budget-panel` for the list area,
//! `#modal` for dialogs and `#field-<name>` for single form fields.

use presupuestos_config::{Config, CurrencyConfig, PaginationConfig};
use presupuestos_core::{
    format_amount, format_date, Budget, BudgetStatus, FormField, FormModal, PageLink, PageState, Paginator,
};
use presupuestos_utils::escape_html;

pub const PANEL_ID: &str = "budget-panel";
pub const MODAL_ID: &str = "modal";
pub const EMPTY_MESSAGE: &str = "No hay presupuestos disponibles";

// ==================== Status ====================

/// Tailwind classes for a status badge; unrecognized codes are gray
pub fn status_badge_class(status: &BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Pending => "bg-yellow-100 text-yellow-800",
        BudgetStatus::InReview => "bg-blue-100 text-blue-800",
        BudgetStatus::Approved => "bg-green-100 text-green-800",
        BudgetStatus::Rejected => "bg-red-100 text-red-800",
        BudgetStatus::Unrecognized(_) => "bg-gray-100 text-gray-800",
    }
}

pub fn status_badge(status: &BudgetStatus) -> String {
    format!(
        "<span class='inline-flex px-2 py-1 text-xs font-semibold rounded-full {}'>{}</span>",
        status_badge_class(status),
        escape_html(status.label())
    )
}

// ==================== Panel ====================

/// Error banner with a retry button; empty when there is no error
pub fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            r#"<div class='mb-6 bg-red-50 border border-red-200 rounded-md p-4'>
    <div class='flex items-center'>
        <div class='text-red-800'><strong>Error:</strong> {}</div>
        <button hx-post='/presupuestos/reload' hx-target='#{}' hx-swap='outerHTML'
            class='ml-auto text-red-600 hover:text-red-800 text-sm underline'>Reintentar</button>
    </div>
</div>"#,
            escape_html(message),
            PANEL_ID
        ),
        None => String::new(),
    }
}

pub fn loading_indicator() -> String {
    r#"<div class='p-8 text-center'>
    <div class='animate-spin rounded-full h-12 w-12 border-b-2 border-blue-600 mx-auto'></div>
    <p class='mt-4 text-gray-500'>Cargando presupuestos...</p>
</div>"#
        .to_string()
}

/// Record count and the create button
pub fn toolbar(total: usize, loading: bool, busy: bool) -> String {
    let count = if loading {
        "Cargando...".to_string()
    } else {
        format!("{} presupuesto(s) encontrado(s)", total)
    };
    format!(
        r#"<div class='mb-6 flex justify-between items-center'>
    <span class='text-sm text-gray-500'>{}</span>
    <button hx-get='/presupuestos/new' hx-target='#{}' {}
        class='bg-green-600 hover:bg-green-700 text-white font-bold py-2 px-4 rounded-lg shadow transition-colors disabled:opacity-50 disabled:cursor-not-allowed'>
        + Agregar Presupuesto
    </button>
</div>"#,
        count,
        MODAL_ID,
        disabled_attr(busy)
    )
}

/// Records table for the current page
pub fn budget_table(items: &[Budget], currency: &CurrencyConfig, busy: bool) -> String {
    let mut rows = String::new();
    if items.is_empty() {
        rows.push_str(&format!(
            "<tr><td colspan='5' class='px-6 py-4 text-center text-gray-500'>{}</td></tr>",
            EMPTY_MESSAGE
        ));
    }

    for budget in items {
        let path = item_path(&budget.id);
        rows.push_str(&format!(
            r#"<tr class='hover:bg-gray-50'>
    <td class='px-6 py-4 whitespace-nowrap'><div class='text-sm font-medium text-gray-900'>{}</div></td>
    <td class='px-6 py-4 whitespace-nowrap'><div class='text-sm font-semibold text-green-600'>{}</div></td>
    <td class='px-6 py-4 whitespace-nowrap'>{}</td>
    <td class='px-6 py-4 whitespace-nowrap'><div class='text-sm text-gray-900'>{}</div></td>
    <td class='px-6 py-4 whitespace-nowrap text-center'>
        <div class='flex justify-center space-x-2'>
            <button hx-get='{}/edit' hx-target='#{}' {}
                class='bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded text-sm transition-colors disabled:opacity-50'>Editar</button>
            <button hx-get='{}/delete' hx-target='#{}' {}
                class='bg-red-500 hover:bg-red-700 text-white font-bold py-2 px-4 rounded text-sm transition-colors disabled:opacity-50'>Eliminar</button>
        </div>
    </td>
</tr>"#,
            escape_html(&budget.name),
            escape_html(&format_amount(budget.total_amount, currency)),
            status_badge(&budget.status),
            escape_html(&format_date(&budget.date)),
            path,
            MODAL_ID,
            disabled_attr(busy),
            path,
            MODAL_ID,
            disabled_attr(busy)
        ));
    }

    let headers: String = ["Nombre", "Monto", "Estado", "Fecha"]
        .iter()
        .map(|h| format!("<th class='px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider'>{}</th>", h))
        .collect();

    format!(
        r#"<div class='overflow-x-auto'>
<table class='min-w-full bg-white border border-gray-200 rounded-lg shadow'>
    <thead class='bg-gray-50'><tr>{}<th class='px-6 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider'>Acciones</th></tr></thead>
    <tbody class='bg-white divide-y divide-gray-200'>{}</tbody>
</table>
</div>"#,
        headers, rows
    )
}

fn panel_link(page: usize, size: usize) -> String {
    format!(
        "hx-get='/presupuestos/panel?page={}&size={}' hx-target='#{}' hx-swap='outerHTML'",
        page, size, PANEL_ID
    )
}

/// "Mostrando X a Y de Z" line, per-page selector and the page strip
pub fn pagination_controls<T>(paginator: &Paginator<'_, T>, settings: &PaginationConfig) -> String {
    let size = paginator.page_size();
    let current = paginator.current_page();

    let options: String = settings
        .page_size_options
        .iter()
        .map(|option| {
            let selected = if *option == size { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", option, selected, option)
        })
        .collect();

    let nav_class = "px-3 py-2 text-sm font-medium text-gray-500 bg-white border border-gray-300 rounded-md hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed";
    let previous = if paginator.has_previous_page() {
        format!("<button {} class='{}'>Anterior</button>", panel_link(current - 1, size), nav_class)
    } else {
        format!("<button disabled class='{}'>Anterior</button>", nav_class)
    };
    let next = if paginator.has_next_page() {
        format!("<button {} class='{}'>Siguiente</button>", panel_link(current + 1, size), nav_class)
    } else {
        format!("<button disabled class='{}'>Siguiente</button>", nav_class)
    };

    let pages: String = paginator
        .page_window(settings.max_visible_pages)
        .into_iter()
        .map(|link| match link {
            PageLink::Ellipsis => "<span class='px-3 py-2 text-sm text-gray-500'>...</span>".to_string(),
            PageLink::Page(page) if page == current => format!(
                "<button aria-current='page' class='px-3 py-2 text-sm font-medium rounded-md bg-blue-600 text-white'>{}</button>",
                page
            ),
            PageLink::Page(page) => format!(
                "<button {} class='px-3 py-2 text-sm font-medium rounded-md text-gray-500 bg-white border border-gray-300 hover:bg-gray-50'>{}</button>",
                panel_link(page, size),
                page
            ),
        })
        .collect();

    format!(
        r#"<div class='flex items-center justify-between px-4 py-3 bg-white border-t border-gray-200 sm:px-6'>
    <div class='flex items-center space-x-4'>
        <div class='text-sm text-gray-700'>Mostrando <span class='font-medium'>{}</span> a <span class='font-medium'>{}</span> de <span class='font-medium'>{}</span> resultados</div>
        <div class='flex items-center space-x-2'>
            <label class='text-sm text-gray-700'>Por página:</label>
            <select name='size' hx-get='/presupuestos/panel' hx-trigger='change' hx-target='#{}' hx-swap='outerHTML'
                class='border border-gray-300 rounded-md text-sm px-2 py-1'>{}</select>
        </div>
    </div>
    <div class='flex items-center space-x-1'>{}<div class='flex space-x-1'>{}</div>{}</div>
</div>"#,
        paginator.start_index(),
        paginator.end_index(),
        paginator.total_items(),
        PANEL_ID,
        options,
        previous,
        pages,
        next
    )
}

/// List area: banner, toolbar, table and pagination
pub fn budget_panel(state: &PageState, config: &Config, page: usize, size: usize) -> String {
    render_panel(state, config, page, size, false)
}

/// Panel on page 1, marked for an htmx out-of-band swap
pub fn budget_panel_oob(state: &PageState, config: &Config) -> String {
    render_panel(state, config, 1, config.pagination.page_size, true)
}

fn render_panel(state: &PageState, config: &Config, page: usize, size: usize, oob: bool) -> String {
    let body = if state.loading && state.records.is_empty() {
        loading_indicator()
    } else {
        let paginator = Paginator::new(&state.records, size).with_initial_page(page);
        let pagination = if paginator.total_items() > 0 {
            pagination_controls(&paginator, &config.pagination)
        } else {
            String::new()
        };
        format!(
            "{}{}",
            budget_table(paginator.current_items(), &config.currency, state.action_in_progress),
            pagination
        )
    };

    format!(
        r#"<div id='{}'{}>
{}
{}
<div class='bg-white rounded-lg shadow'>{}</div>
</div>"#,
        PANEL_ID,
        if oob { " hx-swap-oob='true'" } else { "" },
        error_banner(state.error.as_deref()),
        toolbar(state.records.len(), state.loading, state.action_in_progress),
        body
    )
}

// ==================== Dialogs ====================

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        "disabled"
    } else {
        ""
    }
}

fn dialog_shell(title: &str, close_url: &str, busy: bool, content: &str) -> String {
    format!(
        r#"<div class='fixed inset-0 z-50 overflow-y-auto'>
    <div class='fixed inset-0 bg-black bg-opacity-50 transition-opacity' hx-post='{url}' hx-target='#{modal}'></div>
    <div class='flex min-h-full items-center justify-center p-4'>
        <div class='relative bg-white rounded-lg shadow-xl max-w-md w-full max-h-[90vh] overflow-y-auto'>
            <div class='flex items-center justify-between p-6 border-b border-gray-200'>
                <h2 class='text-xl font-semibold text-gray-900'>{title}</h2>
                <button hx-post='{url}' hx-target='#{modal}' hx-trigger='click, keyup[key=="Escape"] from:body' {disabled}
                    class='text-gray-400 hover:text-gray-600 transition-colors'>
                    <svg class='w-6 h-6' fill='none' stroke='currentColor' viewBox='0 0 24 24'><path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M6 18L18 6M6 6l12 12'/></svg>
                </button>
            </div>
            <div class='p-6'>{content}</div>
        </div>
    </div>
</div>"#,
        url = close_url,
        modal = MODAL_ID,
        title = title,
        disabled = disabled_attr(busy),
        content = content
    )
}

fn field_label(field: FormField, currency_code: &str) -> String {
    match field {
        FormField::Name => "Nombre del Presupuesto *".to_string(),
        FormField::Amount => format!("Monto Total ({}) *", escape_html(currency_code)),
        FormField::Status => "Estado *".to_string(),
        FormField::Date => "Fecha del Presupuesto *".to_string(),
    }
}

/// One form field with its label and error, swappable on its own
pub fn form_field(field: FormField, modal: &FormModal, currency: &CurrencyConfig, busy: bool) -> String {
    let name = field.as_str();
    let error = modal.errors.get(field);
    let border = if error.is_some() { "border-red-500" } else { "border-gray-300" };
    let edit_attrs = format!(
        r#"hx-post='/presupuestos/form/field' hx-trigger='change' hx-target='#field-{name}' hx-swap='outerHTML' hx-vals='{{"field": "{name}"}}'"#,
        name = name
    );
    let input_class = format!(
        "w-full px-3 py-2 border rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 {}",
        border
    );

    let control = match field {
        FormField::Name => format!(
            "<input type='text' id='{n}' name='{n}' value='{v}' placeholder='Ej: Presupuesto Marketing 2024' class='{c}' {a} {d}>",
            n = name,
            v = escape_html(&modal.form.name),
            c = input_class,
            a = edit_attrs,
            d = disabled_attr(busy)
        ),
        FormField::Amount => format!(
            r#"<div class='relative'>
    <span class='absolute left-3 top-2 text-gray-500'>{s}</span>
    <input type='text' inputmode='decimal' id='{n}' name='{n}' value='{v}' placeholder='1000000' class='{c} pl-8' {a} {d}>
</div>"#,
            s = escape_html(&currency.symbol),
            n = name,
            v = escape_html(&modal.form.amount),
            c = input_class,
            a = edit_attrs,
            d = disabled_attr(busy)
        ),
        FormField::Status => {
            let options: String = BudgetStatus::SELECTABLE
                .iter()
                .map(|status| {
                    let selected = if *status == modal.form.status { " selected" } else { "" };
                    format!("<option value='{}'{}>{}</option>", status.code(), selected, status.label())
                })
                .collect();
            format!(
                "<select id='{n}' name='{n}' class='{c}' {a} {d}>{o}</select>",
                n = name,
                c = input_class,
                a = edit_attrs,
                d = disabled_attr(busy),
                o = options
            )
        }
        FormField::Date => format!(
            "<input type='date' id='{n}' name='{n}' value='{v}' class='{c}' {a} {d}>",
            n = name,
            v = escape_html(&modal.form.date),
            c = input_class,
            a = edit_attrs,
            d = disabled_attr(busy)
        ),
    };

    let message = error
        .map(|e| format!("<p class='mt-1 text-sm text-red-600'>{}</p>", escape_html(e)))
        .unwrap_or_default();

    format!(
        r#"<div id='field-{n}'>
    <label for='{n}' class='block text-sm font-medium text-gray-700 mb-1'>{l}</label>
    {control}
    {message}
</div>"#,
        n = name,
        l = field_label(field, &currency.code),
        control = control,
        message = message
    )
}

/// `/presupuestos/{id}` with the id percent-encoded
pub fn item_path(id: &str) -> String {
    format!("/presupuestos/{}", urlencoding::encode(id))
}

/// Create/edit dialog
pub fn form_modal(modal: &FormModal, currency: &CurrencyConfig, busy: bool, error: Option<&str>) -> String {
    let (title, submit_label) = if modal.is_edit() {
        ("Editar Presupuesto", "Actualizar")
    } else {
        ("Crear Nuevo Presupuesto", "Crear")
    };
    let submit_label = if busy { "Guardando..." } else { submit_label };

    let alert = error
        .map(|e| {
            format!(
                "<div class='bg-red-50 border border-red-200 rounded-md p-3 text-sm text-red-800'>{}</div>",
                escape_html(e)
            )
        })
        .unwrap_or_default();

    let fields: String = [FormField::Name, FormField::Amount, FormField::Status, FormField::Date]
        .into_iter()
        .map(|field| form_field(field, modal, currency, busy))
        .collect();

    // Posts back to the route of the record it was opened for
    let action = match &modal.editing {
        Some(budget) => format!("{}/edit", item_path(&budget.id)),
        None => "/presupuestos/new".to_string(),
    };

    let form = format!(
        r#"<form hx-post='{action}' hx-target='#{modal}' class='space-y-6'>
    {alert}
    <div class='space-y-4'>{fields}</div>
    <div class='flex justify-end space-x-3 pt-4 border-t'>
        <button type='button' hx-post='/presupuestos/modal/close' hx-target='#{modal}' {disabled}
            class='px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 border border-gray-300 rounded-md hover:bg-gray-200'>Cancelar</button>
        <button type='submit' {disabled}
            class='px-4 py-2 text-sm font-medium text-white bg-blue-600 border border-transparent rounded-md hover:bg-blue-700 disabled:opacity-50'>{submit}</button>
    </div>
</form>"#,
        action = action,
        modal = MODAL_ID,
        alert = alert,
        fields = fields,
        disabled = disabled_attr(busy),
        submit = submit_label
    );

    dialog_shell(title, "/presupuestos/modal/close", busy, &form)
}

/// Delete confirmation dialog
pub fn confirm_dialog(budget: &Budget, busy: bool) -> String {
    let content = format!(
        r#"<p class='text-gray-700'>¿Está seguro de eliminar este presupuesto?</p>
<p class='mt-2 font-semibold text-gray-900'>{name}</p>
<div class='flex justify-end space-x-3 pt-6'>
    <button hx-post='/presupuestos/delete/cancel' hx-target='#{modal}' {disabled}
        class='px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 border border-gray-300 rounded-md hover:bg-gray-200'>Cancelar</button>
    <button hx-delete='{path}' hx-target='#{modal}' {disabled}
        class='px-4 py-2 text-sm font-medium text-white bg-red-600 rounded-md hover:bg-red-700 disabled:opacity-50'>Eliminar</button>
</div>"#,
        name = escape_html(&budget.name),
        modal = MODAL_ID,
        path = item_path(&budget.id),
        disabled = disabled_attr(busy)
    );
    dialog_shell("Eliminar Presupuesto", "/presupuestos/delete/cancel", busy, &content)
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn budget(id: &str, name: &str, status: BudgetStatus) -> Budget {
        Budget {
            id: id.to_string(),
            name: name.to_string(),
            total_amount: Decimal::new(1_500_000, 0),
            status,
            date: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn test_status_badge_classes() {
        assert!(status_badge_class(&BudgetStatus::Pending).contains("yellow"));
        assert!(status_badge_class(&BudgetStatus::InReview).contains("blue"));
        assert!(status_badge_class(&BudgetStatus::Approved).contains("green"));
        assert!(status_badge_class(&BudgetStatus::Rejected).contains("red"));

        let odd = BudgetStatus::Unrecognized("ARCHIVADO".to_string());
        assert!(status_badge_class(&odd).contains("gray"));
        assert!(status_badge(&odd).contains(">ARCHIVADO<"));
        assert!(status_badge(&BudgetStatus::InReview).contains("En Revisión"));
    }

    #[test]
    fn test_empty_table() {
        let html = budget_table(&[], &CurrencyConfig::default(), false);
        assert!(html.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_table_row_formats_and_escapes() {
        let rows = vec![budget("b1", "<script>x</script>", BudgetStatus::Approved)];
        let html = budget_table(&rows, &CurrencyConfig::default(), false);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("$ 1.500.000,00"));
        assert!(html.contains("15/1/2024"));
        assert!(html.contains("/presupuestos/b1/edit"));
        assert!(html.contains("/presupuestos/b1/delete"));
    }

    #[test]
    fn test_toolbar_busy_disables_create() {
        assert!(toolbar(3, false, false).contains("3 presupuesto(s) encontrado(s)"));
        assert!(toolbar(0, true, false).contains("Cargando..."));
        assert!(toolbar(3, false, true).contains("disabled"));
        assert!(!toolbar(3, false, false).contains("disabled"));
    }

    #[test]
    fn test_pagination_summary_and_links() {
        let data: Vec<usize> = (0..25).collect();
        let paginator = Paginator::new(&data, 10).with_initial_page(2);
        let html = pagination_controls(&paginator, &PaginationConfig::default());
        assert!(html.contains("Mostrando <span class='font-medium'>11</span> a <span class='font-medium'>20</span> de <span class='font-medium'>25</span> resultados"));
        assert!(html.contains("/presupuestos/panel?page=1&size=10"));
        assert!(html.contains("/presupuestos/panel?page=3&size=10"));
        assert!(html.contains("<option value='10' selected>10</option>"));
        assert!(html.contains("aria-current='page'"));
    }

    #[test]
    fn test_panel_states() {
        let config = Config::default();

        let loading = PageState::default();
        assert!(budget_panel(&loading, &config, 1, 10).contains("Cargando presupuestos..."));

        let failed = PageState {
            loading: false,
            error: Some("Error de conexión".to_string()),
            ..PageState::default()
        };
        let html = budget_panel(&failed, &config, 1, 10);
        assert!(html.contains("Reintentar"));
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("Mostrando"));

        let loaded = PageState {
            loading: false,
            records: vec![budget("a", "A", BudgetStatus::Pending)],
            ..PageState::default()
        };
        let html = budget_panel_oob(&loaded, &config);
        assert!(html.contains("hx-swap-oob='true'"));
        assert!(html.contains("Mostrando"));
    }

    #[test]
    fn test_form_modal_titles_and_errors() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let currency = CurrencyConfig::default();

        let mut modal = FormModal::create(today);
        modal.errors = modal.form.validate();
        let html = form_modal(&modal, &currency, false, None);
        assert!(html.contains("Crear Nuevo Presupuesto"));
        assert!(html.contains("El nombre es requerido"));
        assert!(html.contains("Monto Total (COP) *"));
        assert!(html.contains("value='2024-06-01'"));
        assert!(html.contains("hx-post='/presupuestos/new'"));

        let edit = FormModal::edit(budget("b1", "Q1", BudgetStatus::Rejected), today);
        let html = form_modal(&edit, &currency, true, Some("Nombre duplicado"));
        assert!(html.contains("Editar Presupuesto"));
        assert!(html.contains("Guardando..."));
        assert!(html.contains("Nombre duplicado"));
        assert!(html.contains("<option value='RECHAZADO' selected>Rechazado</option>"));
        assert!(html.contains("hx-post='/presupuestos/b1/edit'"));
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("b1"), "/presupuestos/b1");
        assert_eq!(item_path("a/b c"), "/presupuestos/a%2Fb%20c");
        assert_eq!(item_path("x'y"), "/presupuestos/x%27y");
    }

    #[test]
    fn test_confirm_dialog() {
        let html = confirm_dialog(&budget("b1", "Q1 & Q2", BudgetStatus::Pending), false);
        assert!(html.contains("hx-delete='/presupuestos/b1'"));
        assert!(html.contains("Q1 &amp; Q2"));
        assert!(html.contains("/presupuestos/delete/cancel"));
    }
}
